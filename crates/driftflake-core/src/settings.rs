use jiff::Timestamp;
use typed_builder::TypedBuilder;

/// Default epoch: 2015-01-01T00:00:00Z, in Unix milliseconds.
pub const DEFAULT_EPOCH_MS: i64 = 1_420_070_400_000;

fn default_epoch() -> Timestamp {
    Timestamp::from_millisecond(DEFAULT_EPOCH_MS).expect("default epoch is a valid timestamp")
}

/// Configures a Driftflake generator instance.
///
/// A settings value is immutable once built; overriding a field means
/// building a new value. Validation is deferred to [`Driftflake::new`],
/// which is the configuration-to-live-generator transition.
///
/// [`Driftflake::new`]: crate::Driftflake::new
#[derive(Debug, Clone, Copy, TypedBuilder)]
pub struct DriftflakeSettings {
    /// Zero point of the 42-bit timestamp field. Must be in the past
    /// when the generator starts, or the relative timestamp would go
    /// negative and corrupt the bit layout.
    #[builder(default = default_epoch())]
    pub epoch: Timestamp,
    /// A unique machine index in the range `[0, 31]`.
    #[builder(default = 0)]
    pub worker_id: u8,
    /// A unique per-machine process index in the range `[0, 31]`.
    #[builder(default = 0)]
    pub process_id: u8,
    /// Instant the first id is minted for. `None` means "the wall
    /// clock at start time". Setting this pins lazy generation to a
    /// known slot, e.g. for bulk pre-generation or fixtures.
    #[builder(default, setter(strip_option))]
    pub starting_at: Option<Timestamp>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_field() {
        let settings = DriftflakeSettings::builder().build();
        assert_eq!(settings.epoch.as_millisecond(), DEFAULT_EPOCH_MS);
        assert_eq!(settings.worker_id, 0);
        assert_eq!(settings.process_id, 0);
        assert_eq!(settings.starting_at, None);
    }

    #[test]
    fn builder_overrides_single_fields() {
        let starting_at = Timestamp::from_millisecond(1_500_000_000_000).unwrap();
        let settings = DriftflakeSettings::builder()
            .worker_id(20)
            .process_id(30)
            .starting_at(starting_at)
            .build();
        assert_eq!(settings.epoch.as_millisecond(), DEFAULT_EPOCH_MS);
        assert_eq!(settings.worker_id, 20);
        assert_eq!(settings.process_id, 30);
        assert_eq!(settings.starting_at, Some(starting_at));
    }
}
