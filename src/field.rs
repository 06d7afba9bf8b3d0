/// Temporal order of the two fields of an interlaced frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FieldOrder {
    /// Even rows were captured first
    #[default]
    TopFieldFirst,

    /// Odd rows were captured first
    BottomFieldFirst,
}

impl FieldOrder {
    /// Map an integer `tff` flag as passed by hosts, any non zero value means top field first
    pub fn from_tff(tff: i64) -> Self {
        if tff != 0 {
            FieldOrder::TopFieldFirst
        } else {
            FieldOrder::BottomFieldFirst
        }
    }

    pub fn is_top_field_first(self) -> bool {
        matches!(self, FieldOrder::TopFieldFirst)
    }
}

/// The field whose rows are copied verbatim into an output frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Even rows (0, 2, 4, ...)
    Top,

    /// Odd rows (1, 3, 5, ...)
    Bottom,
}

impl Field {
    /// Main field of output frame `output_index`.
    ///
    /// Outputs `2k` and `2k + 1` are both built from source frame `k`, the first one from the field
    /// captured first.
    pub fn for_output(output_index: usize, order: FieldOrder) -> Self {
        let first = output_index % 2 == 0;

        if first == order.is_top_field_first() {
            Field::Top
        } else {
            Field::Bottom
        }
    }

    pub fn is_top(self) -> bool {
        matches!(self, Field::Top)
    }

    pub fn opposite(self) -> Self {
        match self {
            Field::Top => Field::Bottom,
            Field::Bottom => Field::Top,
        }
    }

    #[inline]
    pub fn is_main_row(self, y: usize) -> bool {
        is_main_row(y, self.is_top())
    }
}

/// Returns true if row `y` belongs to the field copied verbatim
#[inline]
pub fn is_main_row(y: usize, is_top_field_main: bool) -> bool {
    (y % 2 == 0) == is_top_field_main
}

/// Index of the source frame output frame `output_index` is built from
#[inline]
pub fn source_index(output_index: usize) -> usize {
    output_index / 2
}
