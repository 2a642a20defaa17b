//! Form completion percentage

use shared_types::{ContractTemplate, FormValues};

use crate::values::is_empty_value;
use crate::visibility::is_field_visible;

/// Share of visible required fields that hold a value, as a whole percentage.
///
/// Rounds down, so 100 means every visible required field is filled. A form
/// with no visible required fields is complete.
pub fn compute_completion(template: &ContractTemplate, values: &FormValues) -> u8 {
    let (filled, total) = template
        .fields
        .iter()
        .filter(|f| f.required && is_field_visible(template, f, values))
        .fold((0usize, 0usize), |(filled, total), f| {
            let has_value = !is_empty_value(values.get(&f.name));
            (filled + usize::from(has_value), total + 1)
        });

    if total == 0 {
        return 100;
    }
    (filled * 100 / total) as u8
}
