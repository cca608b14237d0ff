//! Pure planning of which records a submission creates.

use std::collections::BTreeMap;

use crate::common::ChildId;
use crate::domains::partners::data::FamilyRequestForm;
use crate::domains::partners::models::Child;

/// One item line with the children it was requested for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedItemLine {
    pub item_id: i64,
    pub child_ids: Vec<ChildId>,
    pub quantity: i32,
}

impl PlannedItemLine {
    pub fn person_count(&self) -> i32 {
        self.child_ids.len() as i32
    }
}

/// Records a submission would create
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FamilyRequestPlan {
    /// Ascending by item id
    pub item_lines: Vec<PlannedItemLine>,
    /// Eligible selected children, in input order
    pub requested_children: Vec<ChildId>,
    /// Selected children that were inactive or needed nothing
    pub skipped_children: Vec<ChildId>,
}

impl FamilyRequestPlan {
    pub fn is_empty(&self) -> bool {
        self.item_lines.is_empty()
    }

    /// Number of child item requests the plan creates
    pub fn child_item_request_count(&self) -> usize {
        self.item_lines.iter().map(|line| line.child_ids.len()).sum()
    }
}

/// Plan child item requests for the selected children
///
/// Only the partner's own `children` are considered; selections naming any
/// other child are ignored. A selected child is requested for when it is
/// active and needs at least one item, and is skipped silently otherwise.
pub fn plan_child_requests(
    children: &[Child],
    form: &FamilyRequestForm,
    default_item_quantity: i32,
) -> FamilyRequestPlan {
    let mut plan = FamilyRequestPlan::default();
    let mut lines: BTreeMap<i64, Vec<ChildId>> = BTreeMap::new();

    for child in children.iter().filter(|c| form.is_selected(c.id)) {
        if !child.is_eligible() {
            plan.skipped_children.push(child.id);
            continue;
        }

        plan.requested_children.push(child.id);

        let mut item_ids = child.requested_item_ids.clone();
        item_ids.sort_unstable();
        item_ids.dedup();
        for item_id in item_ids {
            lines.entry(item_id).or_default().push(child.id);
        }
    }

    plan.item_lines = lines
        .into_iter()
        .map(|(item_id, child_ids)| PlannedItemLine {
            item_id,
            quantity: (child_ids.len() as i32).saturating_mul(default_item_quantity),
            child_ids,
        })
        .collect();

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::FamilyId;
    use chrono::Utc;

    fn child(active: bool, items: &[i64]) -> Child {
        Child {
            id: ChildId::new(),
            family_id: FamilyId::new(),
            first_name: "Sam".to_string(),
            last_name: "Rivera".to_string(),
            active,
            requested_item_ids: items.to_vec(),
            created_at: Utc::now(),
        }
    }

    fn select_all(children: &[Child]) -> FamilyRequestForm {
        FamilyRequestForm {
            selections: children.iter().map(|c| (c.id, true)).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_only_eligible_children_requested() {
        let children = vec![child(true, &[7]), child(true, &[]), child(true, &[7])];
        let plan = plan_child_requests(&children, &select_all(&children), 50);

        assert_eq!(plan.requested_children, vec![children[0].id, children[2].id]);
        assert_eq!(plan.skipped_children, vec![children[1].id]);
        assert_eq!(plan.child_item_request_count(), 2);
    }

    #[test]
    fn test_inactive_child_skipped() {
        let children = vec![child(false, &[7]), child(true, &[7])];
        let plan = plan_child_requests(&children, &select_all(&children), 50);

        assert_eq!(plan.requested_children, vec![children[1].id]);
        assert_eq!(plan.skipped_children, vec![children[0].id]);
    }

    #[test]
    fn test_unselected_children_ignored() {
        let children = vec![child(true, &[7]), child(true, &[8])];
        let form = FamilyRequestForm {
            selections: [(children[0].id, true), (children[1].id, false)]
                .into_iter()
                .collect(),
            ..Default::default()
        };

        let plan = plan_child_requests(&children, &form, 50);

        assert_eq!(plan.requested_children, vec![children[0].id]);
        assert!(plan.skipped_children.is_empty());
    }

    #[test]
    fn test_foreign_child_selection_ignored() {
        let children = vec![child(true, &[7])];
        let form = FamilyRequestForm {
            selections: [(ChildId::new(), true)].into_iter().collect(),
            ..Default::default()
        };

        assert!(plan_child_requests(&children, &form, 50).is_empty());
    }

    #[test]
    fn test_item_lines_aggregate_by_item() {
        let children = vec![child(true, &[9, 3]), child(true, &[3]), child(true, &[3, 3])];
        let plan = plan_child_requests(&children, &select_all(&children), 10);

        let item_ids: Vec<i64> = plan.item_lines.iter().map(|l| l.item_id).collect();
        assert_eq!(item_ids, vec![3, 9]);

        let diapers = &plan.item_lines[0];
        assert_eq!(diapers.person_count(), 3);
        assert_eq!(diapers.quantity, 30);

        let wipes = &plan.item_lines[1];
        assert_eq!(wipes.child_ids, vec![children[0].id]);
        assert_eq!(wipes.quantity, 10);

        assert_eq!(plan.child_item_request_count(), 4);
    }

    #[test]
    fn test_nothing_selected_is_empty_plan() {
        let children = vec![child(true, &[1])];
        let plan = plan_child_requests(&children, &FamilyRequestForm::default(), 50);

        assert!(plan.is_empty());
        assert_eq!(plan.child_item_request_count(), 0);
    }
}
