pub mod domain;
mod parser;

pub use domain::{
    GradeTier, MedicalCategory, PerformanceRating, PersonnelRecord, RosterSnapshot,
};
pub use parser::{RosterImportError, RosterLoader};
