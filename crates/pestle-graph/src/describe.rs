//! Plain-text description of the graph schema, written for a language model
//! that has to produce queries against it.

pub const SCHEMA_DESCRIPTION: &str = "\
Node tables:
  drug(name, ci_name, generic_name, rx_otc, condition_text, rating, reviews, embedding)
  condition(name, ci_name, embedding)
  side_effect(name, ci_name)
  drug_class(name, ci_name)
  brand(name, ci_name)

Relation tables (every field is a record link):
  treats(drug, condition)
  has_side_effect(drug, side_effect)
  belongs_to_class(drug, drug_class)
  marketed_as(drug, brand)

Field notes:
  - name holds the display form of a node; ci_name holds the same text lowercased.
  - rating is a float score out of 10 and reviews is an integer count; either may be absent on a drug.
  - embedding is a 384-dimensional float vector, present on drug and condition nodes only.
  - Record links traverse with dot notation: SELECT drug.name FROM treats WHERE condition.ci_name = 'pain'.";

#[cfg(test)]
mod tests {
    use super::*;
    use pestle_core::{EdgeKind, NodeKind};

    #[test]
    fn description_names_every_table() {
        for kind in NodeKind::ALL {
            assert!(
                SCHEMA_DESCRIPTION.contains(kind.table()),
                "missing node table {}",
                kind.table()
            );
        }
        for kind in EdgeKind::ALL {
            assert!(
                SCHEMA_DESCRIPTION.contains(kind.table()),
                "missing relation table {}",
                kind.table()
            );
        }
    }
}
