pub mod account_type;
pub mod constants;
pub mod error;
pub mod genesis;
pub mod permission;
pub mod types;

pub use account_type::{load_account_types, AccountType};
pub use constants::*;
pub use error::{GenesisRecordError, KeyMaterialError, MakerError, PermissionError};
pub use genesis::{BasicAccount, GenesisAccount, GenesisPrivateValidator, GenesisValidator};
pub use permission::{AccountPermissions, BasePermissions, PermFlag};
pub use types::*;
