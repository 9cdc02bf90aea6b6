use core_types::TreatmentRow;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::HashMap;

/// One treatment applied to a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Treatment {
    pub treatment_name: Option<String>,
    pub treatment_year: Option<i32>,
}

/// A treatment unit with all of its treatments (`GetTreatmentData`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreatmentUnit {
    pub id: String,
    #[serde(rename = "type")]
    pub feature_type: Option<String>,
    pub width: Option<Decimal>,
    pub length: Option<Decimal>,
    pub area: Option<Decimal>,
    pub comments: Option<String>,
    /// The first feature of the unit's `geojson`; any further features are dropped.
    pub geometry: Option<JsonValue>,
    pub treatments: Vec<Treatment>,
}

/// Folds denormalized unit × treatment rows into one [`TreatmentUnit`] per `id`.
///
/// Units appear in order of each id's first row, and their unit-level fields
/// come from that row. Every row contributes one treatment, so a unit's
/// treatment count equals its row count.
pub fn group_treatment_units(rows: Vec<TreatmentRow>) -> Vec<TreatmentUnit> {
    let mut units: Vec<TreatmentUnit> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for row in rows {
        let treatment = Treatment {
            treatment_name: row.treatment_name,
            treatment_year: row.treatment_year,
        };

        match positions.get(&row.id) {
            Some(&position) => units[position].treatments.push(treatment),
            None => {
                positions.insert(row.id.clone(), units.len());
                units.push(TreatmentUnit {
                    id: row.id,
                    feature_type: row.feature_type,
                    width: row.width,
                    length: row.length,
                    area: row.area,
                    comments: row.comments,
                    geometry: row.geojson.into_iter().next(),
                    treatments: vec![treatment],
                });
            }
        }
    }

    units
}
