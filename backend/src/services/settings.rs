//! Settings service: the single exchange-rate record

use tracing::info;

use shared::{validate_exchange_rate, Settings};

use crate::error::{AppError, AppResult};
use crate::store::{Collection, Repository, Storage};

#[derive(Clone)]
pub struct SettingsService {
    db: Storage,
    settings: Repository<Settings>,
}

impl SettingsService {
    pub fn new(db: Storage) -> Self {
        let settings = db.repository(Collection::Settings);
        Self { db, settings }
    }

    /// Stored settings, or the defaults if none were ever saved
    pub async fn get(&self) -> AppResult<Settings> {
        Ok(self
            .settings
            .load_all()
            .await?
            .into_iter()
            .next()
            .unwrap_or_default())
    }

    /// Replace the settings. Existing orders keep their own rate.
    pub async fn save(&self, settings: Settings) -> AppResult<Settings> {
        validate_exchange_rate(settings.exchange_rate_usd_etb)
            .map_err(|msg| AppError::validation("exchangeRateUSD_ETB", msg))?;

        let _guard = self.db.lock().await;
        self.settings.save_all(std::slice::from_ref(&settings)).await?;

        info!(rate = %settings.exchange_rate_usd_etb, "settings saved");
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn test_defaults_until_saved() {
        let service = SettingsService::new(Storage::in_memory());
        assert_eq!(service.get().await.unwrap(), Settings::default());

        let saved = service
            .save(Settings {
                exchange_rate_usd_etb: Decimal::new(1325, 1),
            })
            .await
            .unwrap();
        assert_eq!(service.get().await.unwrap(), saved);
    }

    #[tokio::test]
    async fn test_rejects_non_positive_rate() {
        let service = SettingsService::new(Storage::in_memory());
        let err = service
            .save(Settings {
                exchange_rate_usd_etb: Decimal::ZERO,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }
}
