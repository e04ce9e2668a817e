//! Entity and relationship vocabulary plus fixed contract values.

/// Dimensionality of the embedding vectors written to embeddable nodes.
///
/// This is a contract value shared by the vector indexes and the embedding
/// provider, not a tunable.
pub const EMBEDDING_DIMENSIONS: usize = 384;

/// Marker that introduces alternate-name annotations in raw condition
/// descriptions. Everything from the marker onward is dropped when deriving
/// the condition name.
pub const OTHER_NAMES_MARKER: &str = "Other names:";

/// Delimiter between side-effect tokens in the source data.
pub const SIDE_EFFECT_DELIMITER: char = ';';

/// Delimiter between drug-class and brand-name tokens in the source data.
pub const LIST_DELIMITER: char = ',';

/// Node tables in the drug graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Drug,
    Condition,
    SideEffect,
    DrugClass,
    Brand,
}

impl NodeKind {
    /// All node kinds, loader order.
    pub const ALL: [NodeKind; 5] = [
        NodeKind::Drug,
        NodeKind::Condition,
        NodeKind::SideEffect,
        NodeKind::DrugClass,
        NodeKind::Brand,
    ];

    /// Node kinds that carry an `embedding` property.
    pub const EMBEDDABLE: [NodeKind; 2] = [NodeKind::Drug, NodeKind::Condition];

    /// Table name in the graph store.
    pub fn table(&self) -> &'static str {
        match self {
            NodeKind::Drug => "drug",
            NodeKind::Condition => "condition",
            NodeKind::SideEffect => "side_effect",
            NodeKind::DrugClass => "drug_class",
            NodeKind::Brand => "brand",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.table())
    }
}

/// Relationship tables in the drug graph. Every edge points from a drug to
/// one of the other node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    Treats,
    HasSideEffect,
    BelongsToClass,
    MarketedAs,
}

impl EdgeKind {
    /// All edge kinds, loader order.
    pub const ALL: [EdgeKind; 4] = [
        EdgeKind::Treats,
        EdgeKind::HasSideEffect,
        EdgeKind::BelongsToClass,
        EdgeKind::MarketedAs,
    ];

    /// Table name in the graph store.
    pub fn table(&self) -> &'static str {
        match self {
            EdgeKind::Treats => "treats",
            EdgeKind::HasSideEffect => "has_side_effect",
            EdgeKind::BelongsToClass => "belongs_to_class",
            EdgeKind::MarketedAs => "marketed_as",
        }
    }

    /// Node kind on the target side of this edge. The source side is always
    /// [`NodeKind::Drug`].
    pub fn target(&self) -> NodeKind {
        match self {
            EdgeKind::Treats => NodeKind::Condition,
            EdgeKind::HasSideEffect => NodeKind::SideEffect,
            EdgeKind::BelongsToClass => NodeKind::DrugClass,
            EdgeKind::MarketedAs => NodeKind::Brand,
        }
    }

    /// Name of the link field referencing the target node.
    pub fn target_field(&self) -> &'static str {
        self.target().table()
    }
}

impl std::fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.table())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_targets_match_node_tables() {
        assert_eq!(EdgeKind::Treats.target(), NodeKind::Condition);
        assert_eq!(EdgeKind::HasSideEffect.target(), NodeKind::SideEffect);
        assert_eq!(EdgeKind::BelongsToClass.target(), NodeKind::DrugClass);
        assert_eq!(EdgeKind::MarketedAs.target(), NodeKind::Brand);
    }

    #[test]
    fn table_names_are_stable() {
        assert_eq!(NodeKind::SideEffect.table(), "side_effect");
        assert_eq!(EdgeKind::HasSideEffect.table(), "has_side_effect");
        assert_eq!(EdgeKind::MarketedAs.target_field(), "brand");
    }
}
