//! Binding reconciliation: validate the desired assignments, diff them against the
//! stored bindings of the entity, and apply the difference in one transaction.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use super::{CatalogServiceImpl, internal};
use crate::domain::{
    error::{CatalogError, Result},
    models::{
        AttributeWithValues, Binding, BindingKey, BindingTarget, DesiredAssignment, EntityRef,
        ReconcileOutcome, RequestContext, Violation, ViolationKind,
    },
    ports::{BindingService, CatalogStorage, EntityTx, RelationStore},
    validation::validate_assignment,
};

/// The writes that take the stored bindings to the desired set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcilePlan {
    pub to_insert: Vec<BindingKey>,
    pub to_delete: Vec<i64>,
    pub unchanged: usize,
}

impl ReconcilePlan {
    pub fn outcome(&self) -> ReconcileOutcome {
        ReconcileOutcome {
            inserted: self.to_insert.len(),
            deleted: self.to_delete.len(),
            unchanged: self.unchanged,
        }
    }
}

/// Diffs the stored bindings against the desired keys.
///
/// `current` must already be restricted to the attributes in scope. A stored binding
/// whose key is desired is kept once; any further copy of the same key is deleted.
pub fn plan_reconciliation(current: &[Binding], desired: &BTreeSet<BindingKey>) -> ReconcilePlan {
    let mut kept: HashSet<BindingKey> = HashSet::with_capacity(current.len());
    let mut plan = ReconcilePlan::default();

    for binding in current {
        let key = binding.key();
        if desired.contains(&key) && kept.insert(key) {
            plan.unchanged += 1;
        } else {
            plan.to_delete.push(binding.id);
        }
    }

    plan.to_insert = desired
        .iter()
        .filter(|key| !kept.contains(*key))
        .cloned()
        .collect();

    plan
}

/// Validates every assignment and turns the valid ones into binding keys.
/// Collects every violation rather than stopping at the first.
fn desired_keys(
    entity: EntityRef,
    desired: &[DesiredAssignment],
    attributes: &HashMap<i64, AttributeWithValues>,
) -> std::result::Result<BTreeSet<BindingKey>, Vec<Violation>> {
    let mut violations = Vec::new();
    let mut targets: BTreeMap<i64, BTreeSet<BindingTarget>> = BTreeMap::new();

    for assignment in desired {
        let Some(attribute) = attributes.get(&assignment.attribute_id) else {
            continue;
        };
        match validate_assignment(assignment, attribute, entity) {
            Ok(Some(target)) => {
                targets
                    .entry(assignment.attribute_id)
                    .or_default()
                    .insert(target);
            }
            Ok(None) => {}
            Err(kind) => violations.push(Violation {
                attribute_id: assignment.attribute_id,
                value_id: assignment.value_id,
                kind,
            }),
        }
    }

    for (attribute_id, chosen) in &targets {
        let single_valued = attributes
            .get(attribute_id)
            .is_some_and(|a| !a.definition.input_kind.allows_many());
        if single_valued && chosen.len() > 1 {
            violations.push(Violation {
                attribute_id: *attribute_id,
                value_id: None,
                kind: ViolationKind::TooManyValues,
            });
        }
    }

    if !violations.is_empty() {
        return Err(violations);
    }

    Ok(targets
        .into_iter()
        .flat_map(|(attribute_id, chosen)| {
            chosen.into_iter().map(move |target| BindingKey {
                attribute_id,
                target,
            })
        })
        .collect())
}

impl<C, R> BindingService for CatalogServiceImpl<C, R>
where
    C: CatalogStorage,
    R: RelationStore,
    anyhow::Error: From<C::Error>,
    anyhow::Error: From<R::Error>,
{
    #[tracing::instrument(skip(self, ctx, desired), fields(actor = %ctx, entity = %entity, assignments = desired.len()))]
    async fn reconcile(
        &self,
        ctx: RequestContext,
        entity: EntityRef,
        desired: Vec<DesiredAssignment>,
    ) -> Result<ReconcileOutcome> {
        let attribute_ids: Vec<i64> = desired
            .iter()
            .map(|a| a.attribute_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if attribute_ids.is_empty() {
            return Ok(ReconcileOutcome::default());
        }

        let attributes: HashMap<i64, AttributeWithValues> = self
            .catalog
            .get_attributes_with_values(&attribute_ids)
            .await
            .map_err(internal)?
            .into_iter()
            .map(|a| (a.definition.id, a))
            .collect();

        let missing: Vec<i64> = attribute_ids
            .iter()
            .copied()
            .filter(|id| !attributes.contains_key(id))
            .collect();
        if !missing.is_empty() {
            tracing::warn!(?missing, "reconciliation references unknown attributes");
            return Err(CatalogError::AttributeNotFound(missing));
        }

        let desired_keys = desired_keys(entity, &desired, &attributes).map_err(|violations| {
            tracing::warn!(count = violations.len(), "reconciliation rejected");
            CatalogError::Rejected(violations)
        })?;

        let mut tx = self
            .relations
            .begin_entity_tx(entity)
            .await
            .map_err(internal)?;

        let current = tx
            .find_by_entity_and_attributes(&attribute_ids)
            .await
            .map_err(internal)?;

        let plan = plan_reconciliation(&current, &desired_keys);
        tracing::debug!(?plan, "reconciliation plan");

        if !plan.to_delete.is_empty() {
            tx.batch_delete(&plan.to_delete).await.map_err(internal)?;
        }
        if !plan.to_insert.is_empty() {
            tx.batch_insert(&plan.to_insert).await.map_err(internal)?;
        }
        tx.commit().await.map_err(internal)?;

        let outcome = plan.outcome();
        tracing::info!(
            inserted = outcome.inserted,
            deleted = outcome.deleted,
            unchanged = outcome.unchanged,
            "reconciled bindings"
        );
        Ok(outcome)
    }

    #[tracing::instrument(skip(self))]
    async fn list_entity_bindings(&self, entity: EntityRef) -> Result<Vec<Binding>> {
        self.relations
            .list_entity_bindings(entity)
            .await
            .map_err(internal)
    }
}
