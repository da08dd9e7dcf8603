//! Analytics over an enriched roster: derived scores, the standing
//! reports, weighted team selection, and the what-if question engine.

pub mod reports;
pub mod scores;
pub mod team;
pub mod whatif;

pub use scores::{DerivedScores, EnrichedRoster, EnrichedRow};
pub use team::{select_team, TeamRequest, DEFAULT_TEAM_HEADCOUNT};
pub use whatif::{NarrativeClient, WhatIfAction, WhatIfData, WhatIfEngine, WhatIfOutcome};
