use crate::error::UnknownTypeError;
use crate::model::{AsItem, AssetType, TypeSelector};

/// Splits `items` into those of `asset_type` and the rest. Both halves keep input order.
pub fn partition<T: AsItem>(items: Vec<T>, asset_type: AssetType) -> (Vec<T>, Vec<T>) {
    let (matching, non_matching): (Vec<T>, Vec<T>) = items
        .into_iter()
        .partition(|item| item.item().asset_type == asset_type);
    tracing::debug!(
        "{} {}, {} other",
        matching.len(),
        asset_type.plural(),
        non_matching.len()
    );
    (matching, non_matching)
}

/// [`partition`] for a type label given as text, such as `image` or `movies`.
pub fn partition_by_label<T: AsItem>(
    items: Vec<T>,
    label: &str,
) -> Result<(Vec<T>, Vec<T>), UnknownTypeError> {
    let asset_type = label.parse::<AssetType>()?;
    Ok(partition(items, asset_type))
}

#[must_use]
pub fn select<T: AsItem>(items: Vec<T>, selector: TypeSelector) -> Vec<T> {
    items
        .into_iter()
        .filter(|item| selector.accepts(item.item().asset_type))
        .collect()
}

/// Applies a listing name like `images` or `non_movies`.
pub fn select_by_label<T: AsItem>(items: Vec<T>, label: &str) -> Result<Vec<T>, UnknownTypeError> {
    let selector = label.parse::<TypeSelector>()?;
    Ok(select(items, selector))
}

#[must_use]
pub fn of_type<T: AsItem>(items: Vec<T>, asset_type: AssetType) -> Vec<T> {
    select(items, TypeSelector::only(asset_type))
}

#[must_use]
pub fn not_of_type<T: AsItem>(items: Vec<T>, asset_type: AssetType) -> Vec<T> {
    select(items, TypeSelector::except(asset_type))
}

#[must_use]
pub fn any_of_type<T: AsItem>(items: &[T], asset_type: AssetType) -> bool {
    items.iter().any(|item| item.item().asset_type == asset_type)
}

#[must_use]
pub fn any_not_of_type<T: AsItem>(items: &[T], asset_type: AssetType) -> bool {
    items.iter().any(|item| item.item().asset_type != asset_type)
}
