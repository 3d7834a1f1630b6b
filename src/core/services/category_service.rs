use uuid::Uuid;

use crate::ledger::{Category, Ledger};

use super::{ServiceError, ServiceResult};

pub struct CategoryService;

impl CategoryService {
    pub fn add(ledger: &mut Ledger, category: Category) -> ServiceResult<Uuid> {
        Self::validate_name(ledger, None, &category.name)?;
        Ok(ledger.add_category(category))
    }

    pub fn edit(ledger: &mut Ledger, id: Uuid, changes: Category) -> ServiceResult<()> {
        Self::validate_name(ledger, Some(id), &changes.name)?;
        let category = ledger
            .category_mut(id)
            .ok_or_else(|| ServiceError::Invalid("Category not found".into()))?;
        category.name = changes.name;
        category.kind = changes.kind;
        category.color = changes.color;
        category.icon = changes.icon;
        ledger.touch();
        Ok(())
    }

    /// Removes a category without cascading: transactions keep their now
    /// dangling `category_id` and render as uncategorized.
    pub fn remove(ledger: &mut Ledger, id: Uuid) -> ServiceResult<()> {
        let before = ledger.categories.len();
        ledger.categories.retain(|category| category.id != id);
        if ledger.categories.len() == before {
            return Err(ServiceError::Invalid("Category not found".into()));
        }
        ledger.touch();
        Ok(())
    }

    pub fn list(ledger: &Ledger) -> Vec<&Category> {
        ledger.categories.iter().collect()
    }

    fn validate_name(ledger: &Ledger, exclude: Option<Uuid>, candidate: &str) -> ServiceResult<()> {
        let normalized = candidate.trim().to_ascii_lowercase();
        let duplicate = ledger.categories.iter().any(|category| {
            let name = category.name.trim().to_ascii_lowercase();
            name == normalized && exclude.map_or(true, |id| category.id != id)
        });
        if duplicate {
            Err(ServiceError::Invalid(format!(
                "Category `{}` already exists",
                candidate
            )))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{Transaction, TransactionKind};
    use chrono::NaiveDate;

    #[test]
    fn removal_leaves_dangling_references_in_place() {
        let mut ledger = Ledger::new("Categories");
        let category_id = CategoryService::add(
            &mut ledger,
            Category::new("Food", TransactionKind::Expense, "#AA0000"),
        )
        .unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let txn_id = ledger.add_transaction(Transaction::new(
            12.5,
            TransactionKind::Expense,
            date,
            category_id,
            Uuid::new_v4(),
        ));

        CategoryService::remove(&mut ledger, category_id).unwrap();
        let txn = ledger.transaction(txn_id).unwrap();
        assert_eq!(txn.category_id, category_id);
        assert_eq!(ledger.category_label(category_id), "Uncategorized");
    }
}
