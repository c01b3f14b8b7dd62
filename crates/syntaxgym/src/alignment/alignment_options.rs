//! # Alignment Options

/// What to do with a token which matches neither region text nor UNK.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum_macros::EnumString,
    strum_macros::Display,
)]
#[strum(serialize_all = "lowercase")]
pub enum DesyncPolicy {
    /// Fail with [`SyntaxGymError::Desync`](crate::SyntaxGymError::Desync).
    ///
    /// An unmatched token means the model's tokenization and the suite
    /// text disagree.
    #[default]
    Fail,

    /// Attach the token to the current region, move both cursors on by one,
    /// and record a diagnostic.
    Resync,
}

/// Options for [`RegionAligner`](crate::alignment::RegionAligner).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlignmentOptions {
    /// The desynchronization policy.
    pub desync: DesyncPolicy,
}

impl AlignmentOptions {
    /// Set the desynchronization policy.
    pub fn with_desync(
        mut self,
        desync: DesyncPolicy,
    ) -> Self {
        self.set_desync(desync);
        self
    }

    /// Set the desynchronization policy.
    pub fn set_desync(
        &mut self,
        desync: DesyncPolicy,
    ) {
        self.desync = desync;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options() {
        let options = AlignmentOptions::default();
        assert_eq!(options.desync, DesyncPolicy::Fail);

        let options = options.with_desync(DesyncPolicy::Resync);
        assert_eq!(options.desync, DesyncPolicy::Resync);
    }

    #[test]
    fn test_policy_names() {
        assert_eq!("fail".parse::<DesyncPolicy>().unwrap(), DesyncPolicy::Fail);
        assert_eq!(DesyncPolicy::Resync.to_string(), "resync");
        assert!("ignore".parse::<DesyncPolicy>().is_err());
    }
}
