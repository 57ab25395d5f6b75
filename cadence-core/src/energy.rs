//! Energy check-ins and the sleep-adjusted energy tier.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::task::EnergyLevel;

/// A recorded energy check-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyEntry {
    pub id: String,
    /// 1-5
    pub value: u8,
    /// Hours slept the previous night.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_hours: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

impl EnergyEntry {
    /// Validate and build a check-in. The id is derived from the timestamp.
    pub fn new(value: u8, sleep_hours: Option<f64>, timestamp: DateTime<Utc>) -> Result<Self> {
        validate_value(value)?;
        if let Some(s) = sleep_hours {
            validate_sleep(s)?;
        }
        Ok(Self {
            id: format!("energy-{}", timestamp.timestamp_millis()),
            value,
            sleep_hours,
            timestamp,
        })
    }

    pub fn signal(&self) -> EnergySignal {
        EnergySignal {
            value: self.value,
            sleep_hours: self.sleep_hours,
        }
    }
}

fn validate_value(value: u8) -> Result<()> {
    if (1..=5).contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidEnergy(value))
    }
}

fn validate_sleep(hours: f64) -> Result<()> {
    if hours.is_finite() && (0.0..=24.0).contains(&hours) {
        Ok(())
    } else {
        Err(Error::InvalidSleepHours(hours))
    }
}

/// The raw energy input to one planning call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergySignal {
    pub value: u8,
    pub sleep_hours: Option<f64>,
}

impl EnergySignal {
    pub fn new(value: u8) -> Self {
        Self {
            value,
            sleep_hours: None,
        }
    }

    pub fn with_sleep(mut self, hours: f64) -> Self {
        self.sleep_hours = Some(hours);
        self
    }
}

/// Normalized energy: the adjusted scalar and the tier derived from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyReading {
    pub adjusted: f64,
    pub tier: EnergyLevel,
}

pub fn normalize(signal: EnergySignal) -> EnergyReading {
    let adjusted = adjust_for_sleep(f64::from(signal.value), signal.sleep_hours);
    EnergyReading {
        adjusted,
        tier: tier_for(adjusted),
    }
}

/// Apply the sleep adjustment and round to the nearest 0.5.
pub fn adjust_for_sleep(value: f64, sleep_hours: Option<f64>) -> f64 {
    let Some(s) = sleep_hours else {
        return value;
    };

    let adjusted = if s < 6.0 {
        (value - 2.0).max(1.0)
    } else if s < 7.0 {
        (value - 1.0).max(1.0)
    } else if s <= 9.0 {
        (value + 0.5).min(5.0)
    } else if s <= 11.0 {
        (value - 0.5).max(1.0)
    } else {
        (value - 1.0).max(1.0)
    };

    (adjusted * 2.0).round() / 2.0
}

/// ≤2 is low, exactly 3 is medium, anything else is high.
pub fn tier_for(adjusted: f64) -> EnergyLevel {
    if adjusted <= 2.0 {
        EnergyLevel::Low
    } else if (adjusted - 3.0).abs() < f64::EPSILON {
        EnergyLevel::Medium
    } else {
        EnergyLevel::High
    }
}
