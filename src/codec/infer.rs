use std::sync::Arc;

use arrow::array::{Array, ArrayRef, StringArray};
use arrow::compute::cast_with_options;
use arrow::datatypes::DataType;

use crate::column_types::strict_cast_options;

/// Pick the narrowest physical type that every non-missing value parses as.
///
/// Order is Int64, Float64, Boolean, falling back to Utf8. Columns that are
/// entirely missing stay Utf8.
pub(super) fn infer_column(values: StringArray) -> ArrayRef {
    let array: ArrayRef = Arc::new(values);
    if array.null_count() == array.len() {
        return array;
    }

    let options = strict_cast_options();
    for candidate in [DataType::Int64, DataType::Float64] {
        if let Ok(cast) = cast_with_options(&array, &candidate, &options) {
            return cast;
        }
    }

    if is_boolean_text(&array) {
        if let Ok(cast) = cast_with_options(&array, &DataType::Boolean, &options) {
            return cast;
        }
    }

    array
}

/// Arrow's string parser also accepts `yes`/`no`/`t`/`f`; only literal
/// `true`/`false` should infer as Boolean.
fn is_boolean_text(array: &ArrayRef) -> bool {
    let Some(strings) = array.as_any().downcast_ref::<StringArray>() else {
        return false;
    };
    strings
        .iter()
        .flatten()
        .all(|v| v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("false"))
}
