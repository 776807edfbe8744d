//! Attribute definition insert operations.

use crate::error::{CatalogDatabaseError, unique_violation};
use models_catalog::db;
use models_catalog::service::{AttributeWithValues, NewAttribute};
use sqlx::{Pool, Postgres};

type Result<T> = std::result::Result<T, CatalogDatabaseError>;

/// Creates an attribute definition and its initial values in a single transaction.
#[tracing::instrument(skip(db, new_attribute), fields(name = %new_attribute.name))]
pub async fn create_attribute_definition(
    db: &Pool<Postgres>,
    new_attribute: &NewAttribute,
) -> Result<AttributeWithValues> {
    let mut tx = db.begin().await?;

    let row = sqlx::query_as::<_, db::AttributeDefinition>(
        r#"
        INSERT INTO attribute_definitions (
            name,
            sort_score,
            visible,
            attribute_kind,
            input_kind,
            required,
            searchable
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING
            id,
            name,
            sort_score,
            visible,
            attribute_kind,
            input_kind,
            required,
            searchable,
            created_at,
            updated_at
        "#,
    )
    .bind(&new_attribute.name)
    .bind(new_attribute.sort_score)
    .bind(new_attribute.visible)
    .bind(new_attribute.attribute_kind)
    .bind(new_attribute.input_kind)
    .bind(new_attribute.required)
    .bind(new_attribute.searchable)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| match unique_violation(&e) {
        Some("attribute_definitions_name_key") => {
            CatalogDatabaseError::DuplicateName(new_attribute.name.clone())
        }
        _ => {
            tracing::error!(error = ?e, "attribute definition insert failed");
            CatalogDatabaseError::Query(e)
        }
    })?;

    let mut values = Vec::with_capacity(new_attribute.values.len());
    for value in &new_attribute.values {
        values.push(
            crate::attribute_values::insert::insert_attribute_value(&mut *tx, row.id, value)
                .await?,
        );
    }
    models_catalog::service::attribute_value::sort_for_display(&mut values);

    tx.commit().await?;

    tracing::info!(
        attribute_id = row.id,
        value_count = values.len(),
        "created attribute definition"
    );

    Ok(AttributeWithValues {
        definition: row.into(),
        values,
    })
}

#[cfg(all(test, feature = "db_tests"))]
mod tests {
    use super::*;
    use catalog_db_migrator::CATALOG_DB_MIGRATIONS;
    use cool_asserts::assert_matches;
    use models_catalog::service::NewAttributeValue;
    use models_catalog::{AttributeKind, InputKind};

    fn new_attribute(name: &str, values: Vec<NewAttributeValue>) -> NewAttribute {
        NewAttribute {
            name: name.to_string(),
            sort_score: 5,
            visible: true,
            attribute_kind: AttributeKind::Sale,
            input_kind: InputKind::MultiSelect,
            required: false,
            searchable: true,
            values,
        }
    }

    #[sqlx::test(
        migrator = "CATALOG_DB_MIGRATIONS",
        fixtures(path = "../../fixtures", scripts("catalog"))
    )]
    async fn test_create_attribute_definition_with_values(
        pool: Pool<Postgres>,
    ) -> anyhow::Result<()> {
        let created = create_attribute_definition(
            &pool,
            &new_attribute(
                "Fit",
                vec![
                    NewAttributeValue::new("slim", 1),
                    NewAttributeValue::new("regular", 2),
                ],
            ),
        )
        .await?;

        assert_eq!(created.definition.name, "Fit");
        let values: Vec<&str> = created.values.iter().map(|v| v.value.as_str()).collect();
        assert_eq!(values, vec!["regular", "slim"]);
        assert!(
            created
                .values
                .iter()
                .all(|v| v.attribute_id == created.definition.id)
        );
        Ok(())
    }

    #[sqlx::test(
        migrator = "CATALOG_DB_MIGRATIONS",
        fixtures(path = "../../fixtures", scripts("catalog"))
    )]
    async fn test_create_attribute_definition_duplicate_name(
        pool: Pool<Postgres>,
    ) -> anyhow::Result<()> {
        let result = create_attribute_definition(&pool, &new_attribute("Colour", vec![])).await;
        assert_matches!(result, Err(CatalogDatabaseError::DuplicateName(name)) => {
            assert_eq!(name, "Colour");
        });
        Ok(())
    }

    #[sqlx::test(
        migrator = "CATALOG_DB_MIGRATIONS",
        fixtures(path = "../../fixtures", scripts("catalog"))
    )]
    async fn test_create_attribute_definition_duplicate_value_rolls_back(
        pool: Pool<Postgres>,
    ) -> anyhow::Result<()> {
        let result = create_attribute_definition(
            &pool,
            &new_attribute(
                "Fit",
                vec![
                    NewAttributeValue::new("slim", 1),
                    NewAttributeValue::new("slim", 2),
                ],
            ),
        )
        .await;

        assert_matches!(result, Err(CatalogDatabaseError::DuplicateValue { .. }));
        assert!(
            crate::attribute_definitions::get::list_attribute_definitions(&pool)
                .await?
                .iter()
                .all(|d| d.name != "Fit")
        );
        Ok(())
    }
}
