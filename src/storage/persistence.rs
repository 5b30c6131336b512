//! Ledger persistence layer
//!
//! Provides save/load functionality for the ledger registry.

use crate::token::LedgerRegistry;
use std::fs;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;
use thiserror::Error;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub registry_file: String,
    pub backup_enabled: bool,
    pub max_backups: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".ledger_data"),
            registry_file: "ledgers.json".to_string(),
            backup_enabled: true,
            max_backups: 5,
        }
    }
}

/// Registry storage manager
pub struct LedgerStore {
    config: StorageConfig,
}

impl LedgerStore {
    /// Create a new storage manager
    pub fn new(config: StorageConfig) -> Result<Self, StorageError> {
        fs::create_dir_all(&config.data_dir)?;
        Ok(Self { config })
    }

    /// Create with default configuration
    pub fn with_defaults() -> Result<Self, StorageError> {
        Self::new(StorageConfig::default())
    }

    /// Get the registry file path
    fn registry_path(&self) -> PathBuf {
        self.config.data_dir.join(&self.config.registry_file)
    }

    /// Get a backup file path
    fn backup_path(&self, index: usize) -> PathBuf {
        self.config
            .data_dir
            .join(format!("{}.backup.{}", self.config.registry_file, index))
    }

    /// Save the registry to disk
    pub fn save(&self, registry: &LedgerRegistry) -> Result<(), StorageError> {
        let path = self.registry_path();

        // Create backup if enabled
        if self.config.backup_enabled && path.exists() {
            self.rotate_backups()?;
            fs::copy(&path, self.backup_path(0))?;
        }

        // Write to temporary file first
        let temp_path = self.config.data_dir.join("ledgers.tmp");
        let file = fs::File::create(&temp_path)?;
        let writer = BufWriter::new(file);

        serde_json::to_writer_pretty(writer, registry)?;

        // Atomic rename
        fs::rename(&temp_path, &path)?;

        Ok(())
    }

    /// Load the registry from disk
    pub fn load(&self) -> Result<LedgerRegistry, StorageError> {
        let path = self.registry_path();

        if !path.exists() {
            return Err(StorageError::InvalidData(
                "Registry file not found".to_string(),
            ));
        }

        let file = fs::File::open(&path)?;
        let reader = BufReader::new(file);

        let registry: LedgerRegistry = serde_json::from_reader(reader)?;

        Ok(registry)
    }

    /// Check if a saved registry exists
    pub fn exists(&self) -> bool {
        self.registry_path().exists()
    }

    /// Delete the saved registry
    pub fn delete(&self) -> Result<(), StorageError> {
        let path = self.registry_path();
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Rotate backup files
    fn rotate_backups(&self) -> Result<(), StorageError> {
        // Delete oldest backup
        let oldest = self.backup_path(self.config.max_backups - 1);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }

        // Shift existing backups
        for i in (0..self.config.max_backups - 1).rev() {
            let current = self.backup_path(i);
            if current.exists() {
                let next = self.backup_path(i + 1);
                fs::rename(&current, &next)?;
            }
        }

        Ok(())
    }

    /// Restore from a backup
    pub fn restore_backup(&self, backup_index: usize) -> Result<LedgerRegistry, StorageError> {
        let backup_path = self.backup_path(backup_index);

        if !backup_path.exists() {
            return Err(StorageError::InvalidData(format!(
                "Backup {} not found",
                backup_index
            )));
        }

        let file = fs::File::open(&backup_path)?;
        let reader = BufReader::new(file);

        let registry: LedgerRegistry = serde_json::from_reader(reader)?;

        Ok(registry)
    }

    /// List available backups
    pub fn list_backups(&self) -> Vec<usize> {
        let mut backups = Vec::new();

        for i in 0..self.config.max_backups {
            if self.backup_path(i).exists() {
                backups.push(i);
            }
        }

        backups
    }

    /// Get storage statistics
    pub fn stats(&self) -> Result<StorageStats, StorageError> {
        let path = self.registry_path();

        let file_size = if path.exists() {
            fs::metadata(&path)?.len()
        } else {
            0
        };

        let backup_count = self.list_backups().len();

        Ok(StorageStats {
            file_size,
            backup_count,
            data_dir: self.config.data_dir.clone(),
        })
    }
}

/// Storage statistics
#[derive(Debug)]
pub struct StorageStats {
    pub file_size: u64,
    pub backup_count: usize,
    pub data_dir: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, U256};

    fn test_store(data_dir: PathBuf) -> LedgerStore {
        let config = StorageConfig {
            data_dir,
            ..Default::default()
        };
        LedgerStore::new(config).unwrap()
    }

    #[test]
    fn test_save_load_registry() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = test_store(temp_dir.path().to_path_buf());

        let mut registry = LedgerRegistry::new();
        let deployer = Address::repeat_byte(0xAA);
        let holder = Address::repeat_byte(0x11);
        let spender = Address::repeat_byte(0x22);

        let address = registry
            .deploy("MyToken".to_string(), "My".to_string(), deployer)
            .unwrap();
        registry.mint(&address, holder, U256::from(50)).unwrap();
        registry
            .approve(&address, holder, spender, U256::from(20))
            .unwrap();

        // Save
        store.save(&registry).unwrap();
        assert!(store.exists());

        // Load
        let loaded = store.load().unwrap();
        assert_eq!(loaded.count(), 1);
        assert_eq!(
            loaded.balance_of(&address, holder).unwrap(),
            U256::from(50)
        );
        assert_eq!(
            loaded.allowance(&address, holder, spender).unwrap(),
            U256::from(20)
        );
        assert_eq!(loaded.total_supply(&address).unwrap(), U256::from(50));
    }

    #[test]
    fn test_load_missing_registry_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = test_store(temp_dir.path().to_path_buf());

        assert!(!store.exists());
        assert!(matches!(store.load(), Err(StorageError::InvalidData(_))));
    }

    #[test]
    fn test_backup_rotation() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            data_dir: temp_dir.path().to_path_buf(),
            max_backups: 3,
            ..Default::default()
        };

        let store = LedgerStore::new(config).unwrap();
        let mut registry = LedgerRegistry::new();
        let deployer = Address::repeat_byte(0xAA);

        // Save multiple times
        for _ in 0..5 {
            store.save(&registry).unwrap();
            registry
                .deploy("MyToken".to_string(), "My".to_string(), deployer)
                .unwrap();
        }

        // Should have 3 backups (max)
        let backups = store.list_backups();
        assert!(backups.len() <= 3);

        // Newest backup lags the saved file by one deployment
        let restored = store.restore_backup(0).unwrap();
        let saved = store.load().unwrap();
        assert_eq!(restored.count() + 1, saved.count());
    }
}
