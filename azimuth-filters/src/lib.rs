pub mod distribution;
pub mod error;
pub mod option;
pub mod outcome;
pub mod pagination;
pub mod pipeline;
pub mod query;
pub mod selection;
pub mod selector;

pub use selector::FilterSelector;

pub mod prelude {
    pub use crate::distribution::{DISPLAY_ORDER, Segment, distribution, distribution_bar};
    pub use crate::error::FilterError;
    pub use crate::option::{FilterOption, parse_options};
    pub use crate::outcome::{OutcomeCounts, OutcomeKind};
    pub use crate::pagination::{PaginationPolicy, PaginationWindow, ROW_HEIGHT};
    pub use crate::pipeline::{Operator, OptionQuery, PreparedOption, SearchMode, prepare_options};
    pub use crate::query::{DatasetFilters, FilterGroupKind};
    pub use crate::selection::{SelectAllState, SelectionController, select_all_state};
    pub use crate::selector::{
        EventResult, FilterGroupView, FilterSelector, FilterSelectorEvent, FilterSelectorProps,
        LineTarget, OptionRow, RenderOptions, RenderedLine, Span, Tone, render_group,
    };
}
