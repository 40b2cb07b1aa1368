//! Relational dictionary source (UMLS concept/string tables)
//!
//! A thin projection over the MRCONSO/MRSTY tables. The queries here are
//! plain filters; all interpretation of the returned strings happens in
//! the text pipeline.

use sqlx::mysql::{MySql, MySqlPool};
use sqlx::{QueryBuilder, Row};

use crate::error::Result;
use crate::types::ConceptCode;

/// One display-term row: the raw string plus its source vocabulary.
#[derive(Debug, Clone)]
pub struct TermRow {
    pub text: String,
    pub source: String,
}

/// Pooled connection to the terminology source database.
#[derive(Debug, Clone)]
pub struct RelationalSource {
    pool: MySqlPool,
}

impl RelationalSource {
    pub async fn connect(url: &str) -> Result<Self> {
        Ok(Self {
            pool: MySqlPool::connect(url).await?,
        })
    }

    /// Distinct concept codes in a code range, restricted to the given
    /// semantic types. A concept appears once per matching semantic type.
    pub async fn concept_codes(
        &self,
        from_cui: &str,
        to_cui: &str,
        semantic_types: &[&str],
    ) -> Result<Vec<ConceptCode>> {
        let mut query: QueryBuilder<MySql> = QueryBuilder::new(
            "SELECT DISTINCT a.CUI AS cui, b.STY AS sty \
             FROM MRCONSO a INNER JOIN MRSTY b ON a.CUI = b.CUI \
             WHERE a.CUI BETWEEN ",
        );
        query.push_bind(from_cui);
        query.push(" AND ");
        query.push_bind(to_cui);
        query.push(" AND b.STY IN (");

        let mut types = query.separated(", ");
        for sty in semantic_types {
            types.push_bind(*sty);
        }
        query.push(") ORDER BY a.CUI");

        let rows = query.build().fetch_all(&self.pool).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                Ok(ConceptCode {
                    cui: row.try_get("cui")?,
                    sty: row.try_get("sty")?,
                })
            })
            .collect::<std::result::Result<Vec<_>, sqlx::Error>>()?)
    }

    /// Display terms of one concept from the given source vocabularies.
    ///
    /// Strings come back as raw bytes; rows that do not decode are dropped
    /// here (logged at debug) rather than failing the batch.
    pub async fn display_terms(
        &self,
        cui: &str,
        vocabularies: &[&str],
        limit: u32,
    ) -> Result<Vec<TermRow>> {
        let mut query: QueryBuilder<MySql> = QueryBuilder::new("SELECT STR, SAB FROM MRCONSO WHERE CUI = ");
        query.push_bind(cui);
        query.push(" AND SAB IN (");

        let mut sources = query.separated(", ");
        for vocabulary in vocabularies {
            sources.push_bind(*vocabulary);
        }
        query.push(") LIMIT ");
        query.push_bind(limit);

        let rows = query.build().fetch_all(&self.pool).await?;
        let mut terms = Vec::with_capacity(rows.len());

        for row in rows {
            let bytes: Vec<u8> = row.try_get("STR")?;
            match String::from_utf8(bytes) {
                Ok(text) => terms.push(TermRow {
                    text,
                    source: row.try_get("SAB")?,
                }),
                Err(_) => {
                    tracing::debug!(cui, "dropping display term with malformed encoding");
                }
            }
        }

        Ok(terms)
    }
}
