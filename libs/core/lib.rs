use bizdir_storage::StorageBox;
use entities::{AuthBox, Identity};
use services::{BookingService, BusinessService, DirectoryService, TaskService};

pub mod contact;
pub mod directory;
pub mod entities;
pub mod error;
mod load;
pub mod services;
mod utils;

#[cfg(test)]
mod test_utilities;

pub use error::{CoreError, CoreResult};
pub use load::{load, load_core, LoadOptions};

pub struct Core {
    storage: StorageBox,
    auth: AuthBox,
    excluded_names: Vec<String>,
    /// Ok - found | Err - not found with error reason
    found_config_file: Result<(), eyre::Error>,
}

impl Core {
    pub async fn initialize(&self) -> eyre::Result<()> {
        self.storage.init().await?;
        Ok(())
    }

    pub fn identity(&self) -> Option<Identity> {
        self.auth.current_identity()
    }

    pub fn directory(&self) -> DirectoryService {
        DirectoryService::builder()
            .storage(self.storage.clone())
            .auth(self.auth.clone())
            .excluded_names(self.excluded_names.clone())
            .build()
    }

    pub fn businesses(&self) -> BusinessService {
        BusinessService::builder()
            .storage(self.storage.clone())
            .auth(self.auth.clone())
            .build()
    }

    pub fn tasks(&self) -> TaskService {
        TaskService::builder()
            .storage(self.storage.clone())
            .auth(self.auth.clone())
            .build()
    }

    pub fn bookings(&self) -> BookingService {
        BookingService::builder()
            .storage(self.storage.clone())
            .auth(self.auth.clone())
            .build()
    }

    pub fn get_inner_storage(&self) -> &StorageBox {
        &self.storage
    }

    pub fn has_found_config_file(&self) -> &Result<(), eyre::Error> {
        &self.found_config_file
    }
}
