mod sequence_statistics;
pub use sequence_statistics::SequenceStatistics;
