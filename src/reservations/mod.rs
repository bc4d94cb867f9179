pub mod domain;
pub mod repository;

pub use domain::{NewReservation, ReservationDraft, ReservationPatch};
pub use repository::{DynReservationStore, ReservationStore, SqliteReservationStore};
