//! Assembled SQL statement.

use std::fmt;

/// Clauses of a generated `SELECT`, rendered through [`fmt::Display`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SqlStatement {
    pub projection: Vec<String>,
    pub from: String,
    pub joins: Vec<String>,
    /// Conditions joined with `AND`.
    pub filters: Vec<String>,
    pub order_by: Option<String>,
    pub limit: Option<u64>,
}

impl fmt::Display for SqlStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SELECT {} FROM {}", self.projection.join(", "), self.from)?;
        for join in &self.joins {
            write!(f, " {join}")?;
        }
        if !self.filters.is_empty() {
            write!(f, " WHERE {}", self.filters.join(" AND "))?;
        }
        if let Some(order_by) = &self.order_by {
            write!(f, " ORDER BY {order_by}")?;
        }
        if let Some(limit) = self.limit {
            write!(f, " LIMIT {limit}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_statement() {
        let statement = SqlStatement {
            projection: vec!["games.gameDate AS game_date".to_string()],
            from: "games".to_string(),
            ..SqlStatement::default()
        };
        assert_eq!(
            statement.to_string(),
            "SELECT games.gameDate AS game_date FROM games"
        );
    }

    #[test]
    fn test_full_statement() {
        let statement = SqlStatement {
            projection: vec!["a".to_string(), "b".to_string()],
            from: "games".to_string(),
            joins: vec!["LEFT JOIN t ON x = y".to_string()],
            filters: vec!["c = ?1".to_string(), "d > ?2".to_string()],
            order_by: Some("e DESC".to_string()),
            limit: Some(10),
        };
        assert_eq!(
            statement.to_string(),
            "SELECT a, b FROM games LEFT JOIN t ON x = y WHERE c = ?1 AND d > ?2 ORDER BY e DESC LIMIT 10"
        );
    }
}
