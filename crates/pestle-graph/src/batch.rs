//! Statement builder for batched graph writes.
//!
//! One batch renders as a single `BEGIN`/`COMMIT` transaction of UPSERT
//! statements with numbered bind parameters. Record keys are the display
//! names themselves, which is what makes re-running a load converge instead
//! of duplicating nodes.

use serde_json::{json, Value};

use pestle_core::normalize::lookup_key;
use pestle_core::{EdgeKind, NodeKind, NormalizedRecord};

/// Separator between the endpoint names in a deterministic edge key. The
/// unit separator does not occur in cleaned display names.
pub const EDGE_KEY_SEPARATOR: char = '\u{1f}';

/// Deterministic record key for the edge between two named nodes.
pub fn edge_key(source: &str, target: &str) -> String {
    format!("{}{}{}", source, EDGE_KEY_SEPARATOR, target)
}

/// Accumulates upsert statements plus their bind parameters.
#[derive(Debug, Default)]
pub(crate) struct WriteBatch {
    statements: Vec<String>,
    params: Vec<(String, Value)>,
}

impl WriteBatch {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.statements.len()
    }

    /// Register a bind parameter and return its `$name` reference.
    fn param(&mut self, value: Value) -> String {
        let name = format!("p{}", self.params.len());
        let reference = format!("${}", name);
        self.params.push((name, value));
        reference
    }

    /// Queue upserts for one normalized record: the drug node, every related
    /// node, and the edges between them.
    pub(crate) fn push_record(&mut self, record: &NormalizedRecord) {
        self.push_drug(record);

        if let Some(condition) = &record.condition {
            self.push_node(NodeKind::Condition, condition);
            self.push_edge(EdgeKind::Treats, &record.drug_name, condition);
        }
        for effect in &record.side_effects {
            self.push_node(NodeKind::SideEffect, effect);
            self.push_edge(EdgeKind::HasSideEffect, &record.drug_name, effect);
        }
        for class in &record.drug_classes {
            self.push_node(NodeKind::DrugClass, class);
            self.push_edge(EdgeKind::BelongsToClass, &record.drug_name, class);
        }
        for brand in &record.brands {
            self.push_node(NodeKind::Brand, brand);
            self.push_edge(EdgeKind::MarketedAs, &record.drug_name, brand);
        }
    }

    fn push_drug(&mut self, record: &NormalizedRecord) {
        let name = self.param(json!(record.drug_name));
        let ci_name = self.param(json!(lookup_key(&record.drug_name)));
        let generic = self.param(json!(record.generic_name));
        let rx_otc = self.param(json!(record.rx_otc));
        let condition_text = self.param(json!(record.condition_text));
        // An absent numeric clears the stored property. Binding null would
        // store a null instead of removing the field.
        let rating = match record.rating {
            Some(value) => self.param(json!(value)),
            None => "NONE".to_string(),
        };
        let reviews = match record.reviews {
            Some(value) => self.param(json!(value)),
            None => "NONE".to_string(),
        };

        self.statements.push(format!(
            "UPSERT type::thing('drug', {name}) SET name = {name}, ci_name = {ci_name}, \
             generic_name = {generic}, rx_otc = {rx_otc}, condition_text = {condition_text}, \
             rating = {rating}, reviews = {reviews}"
        ));
    }

    fn push_node(&mut self, kind: NodeKind, name: &str) {
        let name_ref = self.param(json!(name));
        let ci_ref = self.param(json!(lookup_key(name)));
        self.statements.push(format!(
            "UPSERT type::thing('{table}', {name_ref}) SET name = {name_ref}, ci_name = {ci_ref}",
            table = kind.table(),
        ));
    }

    fn push_edge(&mut self, kind: EdgeKind, drug: &str, target: &str) {
        let key_ref = self.param(json!(edge_key(drug, target)));
        let drug_ref = self.param(json!(drug));
        let target_ref = self.param(json!(target));
        self.statements.push(format!(
            "UPSERT type::thing('{table}', {key_ref}) SET drug = type::thing('drug', {drug_ref}), \
             {field} = type::thing('{target_table}', {target_ref})",
            table = kind.table(),
            field = kind.target_field(),
            target_table = kind.target().table(),
        ));
    }

    /// Queue an embedding write for one named node. Uses UPDATE so a node
    /// that disappeared since it was read back is skipped, not recreated.
    pub(crate) fn push_embedding(&mut self, kind: NodeKind, name: &str, vector: &[f32]) {
        let name_ref = self.param(json!(name));
        let vector_ref = self.param(json!(vector));
        self.statements.push(format!(
            "UPDATE type::thing('{table}', {name_ref}) SET embedding = {vector_ref}",
            table = kind.table(),
        ));
    }

    /// Render the batch as one transaction.
    pub(crate) fn into_parts(self) -> (String, Vec<(String, Value)>) {
        let mut sql = String::from("BEGIN TRANSACTION;\n");
        for statement in &self.statements {
            sql.push_str(statement);
            sql.push_str(";\n");
        }
        sql.push_str("COMMIT TRANSACTION;");
        (sql, self.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aspirin() -> NormalizedRecord {
        NormalizedRecord {
            drug_name: "Aspirin".to_string(),
            generic_name: "aspirin".to_string(),
            rx_otc: "OTC".to_string(),
            rating: Some(4.5),
            reviews: Some(120),
            condition_text: "Pain (Other names: Ache)".to_string(),
            condition: Some("Pain".to_string()),
            side_effects: vec!["Nausea".to_string(), "Dizziness".to_string()],
            drug_classes: vec!["NSAID".to_string()],
            brands: vec!["Bayer".to_string()],
        }
    }

    #[test]
    fn one_record_yields_node_and_edge_statements() {
        let mut batch = WriteBatch::new();
        batch.push_record(&aspirin());

        // 1 drug + (1 condition + 2 side effects + 1 class + 1 brand) nodes
        // + 5 edges.
        assert_eq!(batch.len(), 11);

        let (sql, params) = batch.into_parts();
        assert!(sql.starts_with("BEGIN TRANSACTION;"));
        assert!(sql.ends_with("COMMIT TRANSACTION;"));
        assert!(sql.contains("UPSERT type::thing('drug', $p0)"));
        assert!(sql.contains("UPSERT type::thing('treats',"));
        assert!(sql.contains("has_side_effect"));
        assert!(sql.contains("belongs_to_class"));
        assert!(sql.contains("marketed_as"));

        // Param names are unique and every one is referenced.
        for (name, _) in &params {
            assert!(sql.contains(&format!("${}", name)));
        }
        assert_eq!(params[0].1, serde_json::json!("Aspirin"));
        assert_eq!(params[1].1, serde_json::json!("aspirin"));
    }

    #[test]
    fn absent_numerics_render_as_none_literal() {
        let mut record = aspirin();
        record.rating = None;
        record.reviews = None;

        let mut batch = WriteBatch::new();
        batch.push_record(&record);
        let (sql, params) = batch.into_parts();

        assert!(sql.contains("rating = NONE"));
        assert!(sql.contains("reviews = NONE"));
        assert!(params.iter().all(|(_, v)| !v.is_null()));
    }

    #[test]
    fn edge_key_is_order_sensitive() {
        assert_eq!(edge_key("Aspirin", "Pain"), "Aspirin\u{1f}Pain");
        assert_ne!(edge_key("Aspirin", "Pain"), edge_key("Pain", "Aspirin"));
    }

    #[test]
    fn embedding_write_uses_update() {
        let mut batch = WriteBatch::new();
        batch.push_embedding(NodeKind::Condition, "Pain", &[0.25; 4]);
        let (sql, params) = batch.into_parts();

        assert!(sql.contains("UPDATE type::thing('condition', $p0) SET embedding = $p1"));
        assert_eq!(params.len(), 2);
        assert_eq!(params[1].1, serde_json::json!([0.25, 0.25, 0.25, 0.25]));
    }
}
