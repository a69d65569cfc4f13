//! Domain separators for canonical hashing.
//!
//! Each kind of hashed content has its own prefix, so identical bytes hashed
//! as a world and as a report artifact never share a digest. A prefix is
//! `MERCATOR::<KIND>::V1` followed by one NUL byte; it is part of every
//! stored digest and must not change once released.

/// What a [`super::hash::canonical_hash`] input is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HashDomain {
    /// `WorldState` fingerprint bytes.
    WorldState,
    /// `schedule_log.json` content, as a standalone log digest.
    ScheduleLog,
    /// One file of a report directory.
    ReportArtifact,
    /// The digest basis mapping report file names to artifact hashes.
    ReportDigest,
}

impl HashDomain {
    /// Every domain, in declaration order.
    pub const ALL: [HashDomain; 4] = [
        Self::WorldState,
        Self::ScheduleLog,
        Self::ReportArtifact,
        Self::ReportDigest,
    ];

    /// Prefix bytes fed to SHA-256 ahead of the content.
    #[must_use]
    pub const fn as_bytes(self) -> &'static [u8] {
        match self {
            Self::WorldState => b"MERCATOR::WORLD_STATE::V1\0",
            Self::ScheduleLog => b"MERCATOR::SCHEDULE_LOG::V1\0",
            Self::ReportArtifact => b"MERCATOR::REPORT_ARTIFACT::V1\0",
            Self::ReportDigest => b"MERCATOR::REPORT_DIGEST::V1\0",
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::WorldState => "WorldState",
            Self::ScheduleLog => "ScheduleLog",
            Self::ReportArtifact => "ReportArtifact",
            Self::ReportDigest => "ReportDigest",
        }
    }
}

impl std::fmt::Display for HashDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
