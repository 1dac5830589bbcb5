use serde::Serialize;

use crate::models::SeatClass;
use crate::services::heat_map::HeatMapColor;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendItem {
    #[serde(rename = "type")]
    pub item_type: &'static str,
    pub label: &'static str,
    pub css_class: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeatMapLegendItem {
    pub color: &'static str,
    pub label: &'static str,
    pub style: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Legend {
    pub items: Vec<LegendItem>,
    pub heat_map: Vec<HeatMapLegendItem>,
}

pub fn legend() -> Legend {
    let states = [
        ("available", "Available"),
        ("occupied", "Occupied"),
        ("selected", "Selected"),
    ]
    .into_iter()
    .map(|(item_type, label)| LegendItem {
        item_type,
        label,
        css_class: format!("seat-demo {}", item_type),
    });

    let classes = SeatClass::ALL.into_iter().map(|class| LegendItem {
        item_type: class.as_str(),
        label: match class {
            SeatClass::Business => "Business Class",
            other => other.label(),
        },
        css_class: format!("seat-demo {}-demo", class.as_str()),
    });

    let heat_map = HeatMapColor::ALL
        .into_iter()
        .map(|color| HeatMapLegendItem {
            color: color.hex(),
            label: color.label(),
            style: format!("background: {};", color.hex()),
        })
        .collect();

    Legend {
        items: states.chain(classes).collect(),
        heat_map,
    }
}
