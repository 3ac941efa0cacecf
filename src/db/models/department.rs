use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Department {
    pub id: Uuid,
    pub scheme_id: Uuid,
    pub name: String,
}
