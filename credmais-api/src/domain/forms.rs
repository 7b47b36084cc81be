use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct LoginInput {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Admin form creating an account that still has to be claimed by its owner.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct PlaceholderInput {
    #[validate(length(min = 1, max = 150, message = "Name is required"))]
    pub name: String,
    #[validate(length(max = 40))]
    pub phone: Option<String>,
    #[validate(length(min = 1, message = "Provisional password is required"))]
    pub provisional_password: String,
}

/// First-access form: the owner proves knowledge of the provisional password.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct FirstAccessInput {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Provisional password is required"))]
    pub provisional_password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ClaimInput {
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "New password is required"))]
    pub new_password: String,
    #[validate(must_match(other = "new_password", message = "Passwords do not match"))]
    pub confirm_password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AccountEditInput {
    #[validate(length(min = 1, max = 150, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "A valid email is required"))]
    pub email: Option<String>,
    #[validate(length(max = 40))]
    pub phone: Option<String>,
    #[validate(length(min = 1, message = "New password must not be empty"))]
    pub new_password: Option<String>,
}

/// Client record form. `amount` is kept raw and parsed with [`crate::parse_amount`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ContractInput {
    pub id: Option<Uuid>,
    #[validate(length(min = 1, max = 150, message = "Client name is required"))]
    pub name: String,
    #[validate(length(min = 1, max = 30, message = "Tax id is required"))]
    pub tax_id: String,
    #[validate(length(max = 40))]
    pub phone: Option<String>,
    #[validate(length(max = 120))]
    pub product: Option<String>,
    pub amount: String,
    pub seller_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SellerInput {
    pub id: Option<Uuid>,
    #[validate(length(min = 1, max = 150, message = "Seller name is required"))]
    pub name: String,
    #[validate(length(max = 40))]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct NoteInput {
    pub id: Option<Uuid>,
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Text is required"))]
    pub text: String,
}
