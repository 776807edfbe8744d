use cool_asserts::assert_matches;

use super::*;
use crate::domain::{
    error::CatalogError,
    models::{
        AttributeKind, AttributePatch, BindingTarget, DesiredAssignment, EntityRef, InputKind,
        NewAttribute, NewAttributeValue, ReconcileOutcome, RequestContext, ViolationKind,
    },
    ports::{AttributeCatalogService, BindingService},
};
use crate::outbound::InMemoryCatalogStorage;

type Service = CatalogServiceImpl<InMemoryCatalogStorage, InMemoryCatalogStorage>;

struct Catalog {
    service: Service,
    storage: InMemoryCatalogStorage,
    size: i64,
    medium: i64,
    large: i64,
    colour: i64,
    red: i64,
    green: i64,
    blue: i64,
    material: i64,
    season: i64,
    summer: i64,
}

fn ctx() -> RequestContext {
    RequestContext::new("tester")
}

fn new_attribute(
    name: &str,
    attribute_kind: AttributeKind,
    input_kind: InputKind,
    required: bool,
    values: &[&str],
) -> NewAttribute {
    NewAttribute {
        name: name.to_string(),
        sort_score: 0,
        visible: true,
        attribute_kind,
        input_kind,
        required,
        searchable: false,
        values: values
            .iter()
            .map(|v| NewAttributeValue::new(*v, 0))
            .collect(),
    }
}

fn value_id(attribute: &models_catalog::service::AttributeWithValues, text: &str) -> i64 {
    attribute
        .values
        .iter()
        .find(|v| v.value == text)
        .map(|v| v.id)
        .unwrap()
}

async fn catalog() -> Catalog {
    let storage = InMemoryCatalogStorage::new();
    let service = CatalogServiceImpl::new(storage.clone(), storage.clone());

    let size = service
        .define_attribute(
            ctx(),
            new_attribute(
                "Size",
                AttributeKind::Sku,
                InputKind::SingleSelect,
                true,
                &["S", "M", "L"],
            ),
        )
        .await
        .unwrap();
    let colour = service
        .define_attribute(
            ctx(),
            new_attribute(
                "Colour",
                AttributeKind::Sku,
                InputKind::MultiSelect,
                false,
                &["red", "green", "blue"],
            ),
        )
        .await
        .unwrap();
    let material = service
        .define_attribute(
            ctx(),
            new_attribute("Material", AttributeKind::Other, InputKind::FreeText, false, &[]),
        )
        .await
        .unwrap();
    let season = service
        .define_attribute(
            ctx(),
            new_attribute(
                "Season",
                AttributeKind::Sale,
                InputKind::SingleSelect,
                false,
                &["summer", "winter"],
            ),
        )
        .await
        .unwrap();

    Catalog {
        size: size.definition.id,
        medium: value_id(&size, "M"),
        large: value_id(&size, "L"),
        colour: colour.definition.id,
        red: value_id(&colour, "red"),
        green: value_id(&colour, "green"),
        blue: value_id(&colour, "blue"),
        material: material.definition.id,
        season: season.definition.id,
        summer: value_id(&season, "summer"),
        service,
        storage,
    }
}

impl Catalog {
    async fn stored_keys(&self, entity: EntityRef) -> Vec<(i64, BindingTarget)> {
        self.service
            .list_entity_bindings(entity)
            .await
            .unwrap()
            .into_iter()
            .map(|b| (b.attribute_id, b.target))
            .collect()
    }
}

// ===== Reconciliation =====

#[tokio::test]
async fn it_is_idempotent() {
    let c = catalog().await;
    let sku = EntityRef::sku(1);
    let desired = vec![
        DesiredAssignment::value(c.size, c.medium),
        DesiredAssignment::value(c.colour, c.red),
        DesiredAssignment::value(c.colour, c.green),
    ];

    let first = c.service.reconcile(ctx(), sku, desired.clone()).await.unwrap();
    assert_eq!(
        first,
        ReconcileOutcome {
            inserted: 3,
            deleted: 0,
            unchanged: 0,
        }
    );

    let second = c.service.reconcile(ctx(), sku, desired).await.unwrap();
    assert_eq!(
        second,
        ReconcileOutcome {
            inserted: 0,
            deleted: 0,
            unchanged: 3,
        }
    );
}

#[tokio::test]
async fn it_replaces_within_scope_and_leaves_other_attributes() {
    let c = catalog().await;
    let sku = EntityRef::sku(1);
    c.service
        .reconcile(
            ctx(),
            sku,
            vec![
                DesiredAssignment::value(c.size, c.medium),
                DesiredAssignment::value(c.colour, c.red),
            ],
        )
        .await
        .unwrap();

    c.service
        .reconcile(ctx(), sku, vec![DesiredAssignment::value(c.colour, c.blue)])
        .await
        .unwrap();

    assert_eq!(
        c.stored_keys(sku).await,
        vec![
            (c.size, BindingTarget::Value(c.medium)),
            (c.colour, BindingTarget::Value(c.blue)),
        ]
    );
}

#[tokio::test]
async fn it_diffs_multi_select_per_value() {
    let c = catalog().await;
    let sku = EntityRef::sku(1);
    c.service
        .reconcile(
            ctx(),
            sku,
            vec![
                DesiredAssignment::value(c.colour, c.red),
                DesiredAssignment::value(c.colour, c.green),
            ],
        )
        .await
        .unwrap();

    let outcome = c
        .service
        .reconcile(
            ctx(),
            sku,
            vec![
                DesiredAssignment::value(c.colour, c.red),
                DesiredAssignment::value(c.colour, c.blue),
            ],
        )
        .await
        .unwrap();

    assert_eq!(
        outcome,
        ReconcileOutcome {
            inserted: 1,
            deleted: 1,
            unchanged: 1,
        }
    );
    assert_eq!(
        c.stored_keys(sku).await,
        vec![
            (c.colour, BindingTarget::Value(c.red)),
            (c.colour, BindingTarget::Value(c.blue)),
        ]
    );
}

#[tokio::test]
async fn it_reports_every_violation_and_writes_nothing() {
    let c = catalog().await;
    let sku = EntityRef::sku(1);

    let result = c
        .service
        .reconcile(
            ctx(),
            sku,
            vec![
                DesiredAssignment::value(c.size, c.medium),
                DesiredAssignment::text(c.colour, "red"),
                DesiredAssignment::value(c.colour, c.summer),
            ],
        )
        .await;

    assert_matches!(result, Err(CatalogError::Rejected(violations)) => {
        let kinds: Vec<ViolationKind> = violations.iter().map(|v| v.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ViolationKind::InvalidInputForSelectType,
                ViolationKind::AttributeValueNotFound,
            ]
        );
        assert_eq!(violations[1].value_id, Some(c.summer));
    });
    assert!(c.stored_keys(sku).await.is_empty());
}

#[tokio::test]
async fn it_reports_violations_across_attributes_together() {
    let c = catalog().await;
    let product = EntityRef::product(1);

    let result = c
        .service
        .reconcile(
            ctx(),
            product,
            vec![
                DesiredAssignment::clear(c.size),
                DesiredAssignment::text(c.season, "summer"),
                DesiredAssignment::text(c.material, "linen"),
            ],
        )
        .await;

    assert_matches!(result, Err(CatalogError::Rejected(violations)) => {
        let found: Vec<(i64, ViolationKind)> =
            violations.iter().map(|v| (v.attribute_id, v.kind)).collect();
        assert_eq!(
            found,
            vec![
                (c.size, ViolationKind::RequiredValueEmpty),
                (c.season, ViolationKind::InvalidInputForSelectType),
            ]
        );
    });
    assert!(c.stored_keys(product).await.is_empty());
}

#[tokio::test]
async fn it_rejects_the_whole_sku_call_for_a_non_sku_attribute() {
    let c = catalog().await;
    let sku = EntityRef::sku(1);

    let result = c
        .service
        .reconcile(
            ctx(),
            sku,
            vec![
                DesiredAssignment::value(c.size, c.large),
                DesiredAssignment::value(c.season, c.summer),
            ],
        )
        .await;

    assert_matches!(result, Err(CatalogError::Rejected(violations)) => {
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].attribute_id, c.season);
        assert_eq!(violations[0].kind, ViolationKind::AttributeTypeNotSku);
    });
    assert!(c.stored_keys(sku).await.is_empty());

    // the same assignment is fine on a product
    c.service
        .reconcile(
            ctx(),
            EntityRef::product(1),
            vec![DesiredAssignment::value(c.season, c.summer)],
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn it_lists_every_missing_attribute() {
    let c = catalog().await;

    let result = c
        .service
        .reconcile(
            ctx(),
            EntityRef::product(1),
            vec![
                DesiredAssignment::clear(999),
                DesiredAssignment::text(c.material, "wool"),
                DesiredAssignment::clear(998),
            ],
        )
        .await;

    assert_matches!(result, Err(CatalogError::AttributeNotFound(ids)) => {
        assert_eq!(ids, vec![998, 999]);
    });
}

#[tokio::test]
async fn it_rejects_several_values_for_single_valued_attributes() {
    let c = catalog().await;

    let result = c
        .service
        .reconcile(
            ctx(),
            EntityRef::sku(1),
            vec![
                DesiredAssignment::value(c.size, c.medium),
                DesiredAssignment::value(c.size, c.large),
            ],
        )
        .await;

    assert_matches!(result, Err(CatalogError::Rejected(violations)) => {
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, ViolationKind::TooManyValues);
    });
}

#[tokio::test]
async fn it_collapses_repeated_assignments() {
    let c = catalog().await;

    let outcome = c
        .service
        .reconcile(
            ctx(),
            EntityRef::sku(1),
            vec![
                DesiredAssignment::value(c.size, c.medium),
                DesiredAssignment::value(c.size, c.medium),
            ],
        )
        .await
        .unwrap();

    assert_eq!(outcome.inserted, 1);
}

#[tokio::test]
async fn it_clears_an_attribute_named_without_a_value() {
    let c = catalog().await;
    let product = EntityRef::product(1);
    c.service
        .reconcile(
            ctx(),
            product,
            vec![
                DesiredAssignment::text(c.material, "cotton"),
                DesiredAssignment::value(c.season, c.summer),
            ],
        )
        .await
        .unwrap();

    let outcome = c
        .service
        .reconcile(ctx(), product, vec![DesiredAssignment::text(c.material, " ")])
        .await
        .unwrap();

    assert_eq!(outcome.deleted, 1);
    assert_eq!(
        c.stored_keys(product).await,
        vec![(c.season, BindingTarget::Value(c.summer))]
    );
}

#[tokio::test]
async fn it_leaves_state_intact_when_a_write_fails() {
    let c = catalog().await;
    let sku = EntityRef::sku(1);
    c.service
        .reconcile(
            ctx(),
            sku,
            vec![
                DesiredAssignment::value(c.colour, c.red),
                DesiredAssignment::value(c.colour, c.green),
            ],
        )
        .await
        .unwrap();

    c.storage.fail_binding_writes(true);
    let result = c
        .service
        .reconcile(ctx(), sku, vec![DesiredAssignment::value(c.colour, c.blue)])
        .await;
    assert_matches!(result, Err(CatalogError::Internal(_)));

    assert_eq!(
        c.stored_keys(sku).await,
        vec![
            (c.colour, BindingTarget::Value(c.red)),
            (c.colour, BindingTarget::Value(c.green)),
        ]
    );

    // the entity lock was released with the failed transaction
    c.storage.fail_binding_writes(false);
    c.service
        .reconcile(ctx(), sku, vec![DesiredAssignment::value(c.colour, c.blue)])
        .await
        .unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn it_serializes_concurrent_reconciles_of_one_entity() {
    let c = catalog().await;
    let service = std::sync::Arc::new(c.service);
    let sku = EntityRef::sku(1);
    let submitted = [
        vec![c.red, c.green],
        vec![c.green, c.blue],
        vec![c.blue],
        vec![c.red],
    ];

    for _ in 0..10 {
        let handles: Vec<_> = submitted
            .iter()
            .cloned()
            .map(|values| {
                let service = service.clone();
                let colour = c.colour;
                tokio::spawn(async move {
                    let desired = values
                        .into_iter()
                        .map(|value| DesiredAssignment::value(colour, value))
                        .collect();
                    service.reconcile(ctx(), sku, desired).await
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        // whichever call committed last wins outright; nothing is merged
        let mut stored: Vec<i64> = service
            .list_entity_bindings(sku)
            .await
            .unwrap()
            .into_iter()
            .map(|b| match b.target {
                BindingTarget::Value(value_id) => value_id,
                BindingTarget::Text(_) => panic!("unexpected text binding"),
            })
            .collect();
        stored.sort_unstable();
        assert!(
            submitted.iter().any(|values| {
                let mut values = values.clone();
                values.sort_unstable();
                values == stored
            }),
            "stored {stored:?} is not one of the submitted sets"
        );
    }
}

#[tokio::test]
async fn it_does_nothing_for_an_empty_assignment_list() {
    let c = catalog().await;

    let outcome = c
        .service
        .reconcile(ctx(), EntityRef::sku(1), vec![])
        .await
        .unwrap();

    assert_eq!(outcome, ReconcileOutcome::default());
}

// ===== Catalog =====

#[tokio::test]
async fn it_refuses_to_delete_a_bound_attribute_until_unbound() {
    let c = catalog().await;
    let sku = EntityRef::sku(1);
    c.service
        .reconcile(ctx(), sku, vec![DesiredAssignment::value(c.colour, c.red)])
        .await
        .unwrap();

    let result = c.service.delete_attribute(ctx(), c.colour).await;
    assert_matches!(
        result,
        Err(CatalogError::AttributeStillReferenced { binding_count: 1, .. })
    );

    c.service
        .reconcile(ctx(), sku, vec![DesiredAssignment::clear(c.colour)])
        .await
        .unwrap();
    c.service.delete_attribute(ctx(), c.colour).await.unwrap();

    assert_matches!(
        c.service.get_attribute(c.colour).await,
        Err(CatalogError::AttributeNotFound(_))
    );
    assert_matches!(
        c.service.delete_attribute(ctx(), c.colour).await,
        Err(CatalogError::AttributeNotFound(_))
    );
}

#[tokio::test]
async fn it_rejects_duplicate_names() {
    let c = catalog().await;

    let created = c
        .service
        .define_attribute(
            ctx(),
            new_attribute(" Size ", AttributeKind::Other, InputKind::FreeText, false, &[]),
        )
        .await;
    assert_matches!(created, Err(CatalogError::DuplicateName(name)) => assert_eq!(name, "Size"));

    let renamed = c
        .service
        .update_attribute(
            ctx(),
            c.material,
            AttributePatch {
                name: Some("Colour".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert_matches!(renamed, Err(CatalogError::DuplicateName(_)));
}

#[tokio::test]
async fn it_rejects_invalid_definitions() {
    let c = catalog().await;

    let free_text_sku = c
        .service
        .define_attribute(
            ctx(),
            new_attribute("Fit", AttributeKind::Sku, InputKind::FreeText, false, &[]),
        )
        .await;
    assert_matches!(free_text_sku, Err(CatalogError::InvalidDefinition(_)));

    let patched = c
        .service
        .update_attribute(
            ctx(),
            c.material,
            AttributePatch {
                attribute_kind: Some(AttributeKind::Sku),
                ..Default::default()
            },
        )
        .await;
    assert_matches!(patched, Err(CatalogError::InvalidDefinition(_)));
}

#[tokio::test]
async fn it_applies_only_the_patched_fields() {
    let c = catalog().await;

    let updated = c
        .service
        .update_attribute(
            ctx(),
            c.season,
            AttributePatch {
                sort_score: Some(50),
                visible: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Season");
    assert_eq!(updated.sort_score, 50);
    assert!(!updated.visible);
    assert_eq!(updated.input_kind, InputKind::SingleSelect);

    let listed = c.service.list_attributes().await.unwrap();
    assert_eq!(listed[0].id, c.season);

    assert_matches!(
        c.service
            .update_attribute(ctx(), 999, AttributePatch::default())
            .await,
        Err(CatalogError::AttributeNotFound(_))
    );
}

#[tokio::test]
async fn it_blocks_input_kind_changes_while_bound() {
    let c = catalog().await;
    c.service
        .reconcile(
            ctx(),
            EntityRef::sku(1),
            vec![DesiredAssignment::value(c.colour, c.red)],
        )
        .await
        .unwrap();
    let single = AttributePatch {
        input_kind: Some(InputKind::SingleSelect),
        ..Default::default()
    };

    let result = c
        .service
        .update_attribute(ctx(), c.colour, single.clone())
        .await;
    assert_matches!(result, Err(CatalogError::AttributeStillReferenced { .. }));

    // season has values but no bindings
    let updated = c
        .service
        .update_attribute(
            ctx(),
            c.season,
            AttributePatch {
                input_kind: Some(InputKind::MultiSelect),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.input_kind, InputKind::MultiSelect);

    let to_text = c
        .service
        .update_attribute(
            ctx(),
            c.season,
            AttributePatch {
                input_kind: Some(InputKind::FreeText),
                ..Default::default()
            },
        )
        .await;
    assert_matches!(to_text, Err(CatalogError::InvalidDefinition(_)));
}

#[tokio::test]
async fn it_orders_values_by_score_then_creation() {
    let c = catalog().await;
    let extra_large = c
        .service
        .add_value(ctx(), c.size, NewAttributeValue::new("XL", 5))
        .await
        .unwrap();

    let values = c.service.list_values(c.size).await.unwrap();
    let order: Vec<&str> = values.iter().map(|v| v.value.as_str()).collect();
    assert_eq!(order, vec!["XL", "S", "M", "L"]);
    assert_eq!(values[0].id, extra_large.id);

    let with_values = c.service.get_attribute_with_values(c.size).await.unwrap();
    assert_eq!(with_values.values, values);

    assert_matches!(
        c.service.list_values(999).await,
        Err(CatalogError::AttributeNotFound(_))
    );
}

#[tokio::test]
async fn it_guards_the_value_lifecycle() {
    let c = catalog().await;

    assert_matches!(
        c.service
            .add_value(ctx(), c.size, NewAttributeValue::new("M", 0))
            .await,
        Err(CatalogError::DuplicateValue { .. })
    );
    assert_matches!(
        c.service
            .add_value(ctx(), c.material, NewAttributeValue::new("silk", 0))
            .await,
        Err(CatalogError::InvalidDefinition(_))
    );

    c.service
        .reconcile(
            ctx(),
            EntityRef::sku(1),
            vec![DesiredAssignment::value(c.size, c.medium)],
        )
        .await
        .unwrap();

    assert_matches!(
        c.service.remove_value(ctx(), c.size, c.medium).await,
        Err(CatalogError::ValueStillReferenced { binding_count: 1, .. })
    );
    assert_matches!(
        c.service.remove_value(ctx(), c.size, c.red).await,
        Err(CatalogError::AttributeValueNotFound { .. })
    );
    c.service
        .remove_value(ctx(), c.size, c.large)
        .await
        .unwrap();

    assert_eq!(c.service.list_values(c.size).await.unwrap().len(), 2);
}

#[tokio::test]
async fn it_trims_value_text() {
    let c = catalog().await;

    assert_matches!(
        c.service
            .add_value(ctx(), c.size, NewAttributeValue::new(" M ", 0))
            .await,
        Err(CatalogError::DuplicateValue { value, .. }) => {
            assert_eq!(value, "M");
        }
    );

    let added = c
        .service
        .add_value(ctx(), c.size, NewAttributeValue::new(" XL", 0))
        .await
        .unwrap();
    assert_eq!(added.value, "XL");

    let repeated = c
        .service
        .define_attribute(
            ctx(),
            new_attribute(
                "Fit",
                AttributeKind::Sku,
                InputKind::SingleSelect,
                false,
                &["slim", " slim "],
            ),
        )
        .await;
    assert_matches!(repeated, Err(CatalogError::InvalidDefinition(_)));
}
