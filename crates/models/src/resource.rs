/// Static description of a managed collection and the wording its
/// responses use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceKind {
    /// Collection name, also the path segment (`users`, `dishes`).
    pub collection: &'static str,
    /// Display name used in messages (`User`, `Dish`).
    pub singular: &'static str,
    /// Past tense used on create success (`created`, `added`).
    pub created: &'static str,
    /// Infinitive used on create failure (`create`, `add`).
    pub create: &'static str,
    /// Past tense used on delete success (`deleted`, `removed`).
    pub deleted: &'static str,
}

impl ResourceKind {
    pub const USERS: ResourceKind = ResourceKind {
        collection: "users",
        singular: "User",
        created: "created",
        create: "create",
        deleted: "deleted",
    };

    pub const DISHES: ResourceKind = ResourceKind {
        collection: "dishes",
        singular: "Dish",
        created: "added",
        create: "add",
        deleted: "removed",
    };

    fn lower(&self) -> String {
        self.singular.to_ascii_lowercase()
    }

    pub fn created_message(&self) -> String {
        format!("{} {} successfully", self.singular, self.created)
    }

    pub fn updated_message(&self) -> String {
        format!("{} updated successfully", self.singular)
    }

    pub fn deleted_message(&self) -> String {
        format!("{} {} successfully", self.singular, self.deleted)
    }

    pub fn not_found_message(&self) -> String {
        format!("{} not found", self.singular)
    }

    pub fn create_failed_message(&self) -> String {
        format!("Failed to {} {}", self.create, self.lower())
    }

    pub fn list_failed_message(&self) -> String {
        format!("Failed to retrieve {}", self.collection)
    }

    pub fn get_failed_message(&self) -> String {
        format!("Failed to retrieve {}", self.lower())
    }

    pub fn update_failed_message(&self) -> String {
        format!("Failed to update {}", self.lower())
    }

    pub fn delete_failed_message(&self) -> String {
        format!("Failed to delete {}", self.lower())
    }
}
