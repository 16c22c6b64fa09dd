//! Alert query parameters and outcomes

use crate::constants::{MAX_RESULT_SET_SIZE, MIN_RESULT_SET_SIZE};
use crate::errors::{PortalwatchError, Result};
use crate::impl_wire_enum_conversions;
use crate::types::alert::AlertRecord;
use crate::types::filter::AlertFilter;

/// Field the server sorts the alert list by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Date,
    Severity,
}

impl_wire_enum_conversions!(SortField {
    Date => "date",
    Severity => "severity",
});

impl SortField {
    /// Value sent as `sortField`.
    pub fn api_value(self) -> String {
        self.to_string()
    }
}

/// Sort direction for the alert list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl_wire_enum_conversions!(SortDirection {
    Ascending => "ascending",
    Descending => "descending",
});

impl SortDirection {
    /// Value sent as `sortDirection`: the lower-cased name without its
    /// "ending" suffix (`asc`, `desc`).
    pub fn api_value(self) -> String {
        let name = self.to_string();
        name.strip_suffix("ending").map_or_else(|| name.clone(), str::to_string)
    }
}

/// Parameters of the list mode.
///
/// `sort_by` and `sort_direction` must be given together or not at all; this
/// is checked by [`ListAlertsParams::validate`] rather than the type so that
/// callers assembling parameters from loose input get a clear error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListAlertsParams {
    pub filter: AlertFilter,
    pub sort_by: Option<SortField>,
    pub sort_direction: Option<SortDirection>,
    pub size: u32,
    pub skip: u64,
}

impl Default for ListAlertsParams {
    fn default() -> Self {
        Self {
            filter: AlertFilter::default(),
            sort_by: None,
            sort_direction: None,
            size: MAX_RESULT_SET_SIZE,
            skip: 0,
        }
    }
}

impl ListAlertsParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, filter: AlertFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn sorted_by(mut self, field: SortField, direction: SortDirection) -> Self {
        self.sort_by = Some(field);
        self.sort_direction = Some(direction);
        self
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    pub fn with_skip(mut self, skip: u64) -> Self {
        self.skip = skip;
        self
    }

    /// Sort pair when sorting was requested.
    pub fn sort(&self) -> Option<(SortField, SortDirection)> {
        self.sort_by.zip(self.sort_direction)
    }

    /// # Errors
    /// `InvalidArgument` when the size is outside 1..=100, when exactly one
    /// of the sort field/direction is set, or when the filter is invalid.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_RESULT_SET_SIZE..=MAX_RESULT_SET_SIZE).contains(&self.size) {
            return Err(PortalwatchError::InvalidArgument(format!(
                "result set size must be between {MIN_RESULT_SET_SIZE} and {MAX_RESULT_SET_SIZE}, got {}",
                self.size
            )));
        }

        if self.sort_by.is_some() != self.sort_direction.is_some() {
            return Err(PortalwatchError::InvalidArgument(
                "sort field and sort direction must be specified together".to_string(),
            ));
        }

        self.filter.validate()
    }
}

/// One invocation of the alert query operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertQuery {
    Fetch { identity: String },
    List(ListAlertsParams),
}

/// Records produced by an [`AlertQuery`].
#[derive(Debug, Clone, PartialEq)]
pub enum AlertQueryOutcome {
    One(AlertRecord),
    Many(Vec<AlertRecord>),
}

impl AlertQueryOutcome {
    pub fn into_records(self) -> Vec<AlertRecord> {
        match self {
            Self::One(record) => vec![record],
            Self::Many(records) => records,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Many(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
