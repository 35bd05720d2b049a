//! TUI tab implementations

pub mod explorer;
pub mod graph;
pub mod leaderboard;
pub mod resume;

pub use explorer::ExplorerTab;
pub use graph::GraphTab;
pub use leaderboard::LeaderboardTab;
pub use resume::ResumeTab;
