//! Background sources for lazily loaded widget data

use crate::constants::{AMENITIES, OPTION_LOAD_DELAY_MS, PROPERTY_SUB_TYPES};
use crate::types::OptionItem;
use crate::widgets::multi_select::{option_loader, OptionLoader};
use std::time::Duration;
use tracing::debug;

/// Amenities are known up front
pub fn amenities() -> Vec<OptionItem> {
    AMENITIES
        .iter()
        .map(|(label, value)| OptionItem::new(*label, *value))
        .collect()
}

/// Property sub-types, delivered after a short simulated delay
pub fn property_sub_types() -> OptionLoader {
    option_loader(|| async {
        tokio::time::sleep(Duration::from_millis(OPTION_LOAD_DELAY_MS)).await;
        let options: Vec<OptionItem> = PROPERTY_SUB_TYPES
            .iter()
            .map(|(label, value)| OptionItem::new(*label, *value))
            .collect();
        debug!(count = options.len(), "Property sub-types fetched");
        Ok(options)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn property_sub_types_arrive_after_delay() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let loader = property_sub_types();

        let started = Instant::now();
        let options = runtime.block_on(loader()).unwrap();
        assert!(started.elapsed() >= Duration::from_millis(OPTION_LOAD_DELAY_MS));

        let labels: Vec<_> = options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Apartment", "Villa", "Office Space", "Retail Shop", "Warehouse"]
        );
        assert_eq!(options[2].value, "office_space");
    }

    #[test]
    fn amenities_are_static() {
        let options = amenities();
        assert_eq!(options.len(), 4);
        assert_eq!(options[2], OptionItem::new("Swimming Pool", "pool"));
    }
}
