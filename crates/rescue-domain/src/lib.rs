//! Rescue Dispatch domain model
//!
//! Value objects and entities shared by every stage of the dispatch pipeline:
//! the incoming [`Ticket`], the read-only knowledge entries it is resolved
//! against, and the terminal [`DispatchRecord`] produced for each ticket.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::{
    DispatchRecord, LandmarkEntry, ResourceAssignment, ResourceCenter, Ticket, TicketSummary,
    NO_RESOURCE_AVAILABLE, NO_RESOURCE_DB,
};
pub use errors::{DomainError, DomainResult};
pub use value_objects::{Coordinates, Need, TriageColor, QUANTITY_NOT_GIVEN};
