use crate::error::{AppError, Result};
use crate::models::{
    Contract, Gender, IncomeLevel, InternetService, MaritalStatus, PaymentMethod, ServiceFlag,
};

/// Fixed label-to-integer tables for the categorical fields.
///
/// The integer codes reproduce the training-time label encoding and are a
/// versioned contract shipped with the model artifact. They are fixed here by
/// inspection of the training process, not derived from the dataset:
/// re-deriving them at serve time could silently break training/serving
/// parity.
///
/// Unknown labels are rejected with `InvalidInput` rather than mapped to a
/// fallback code; a mistyped label that silently landed in a real bucket
/// would produce a plausible but wrong prediction.
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoricalEncoder;

/// Names of the categorical fields the encoder covers
pub const CATEGORICAL_FIELDS: [&str; 8] = [
    "Gender",
    "MaritalStatus",
    "IncomeLevel",
    "Contract",
    "InternetService",
    "OnlineSecurity",
    "TechSupport",
    "PaymentMethod",
];

impl CategoricalEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Whether a field has a categorical encoding table
    pub fn is_categorical(&self, field: &str) -> bool {
        CATEGORICAL_FIELDS.contains(&field)
    }

    /// Encode a raw string label for the given field.
    ///
    /// Pure lookup over the closed tables; an unknown field or label is an
    /// error, never a silent default.
    pub fn encode(&self, field: &str, label: &str) -> Result<f64> {
        let code = match field {
            "Gender" => label.parse::<Gender>().map(Self::gender_code),
            "MaritalStatus" => label.parse::<MaritalStatus>().map(Self::marital_status_code),
            "IncomeLevel" => label.parse::<IncomeLevel>().map(Self::income_level_code),
            "Contract" => label.parse::<Contract>().map(Self::contract_code),
            "InternetService" => label
                .parse::<InternetService>()
                .map(Self::internet_service_code),
            "OnlineSecurity" | "TechSupport" => {
                label.parse::<ServiceFlag>().map(Self::service_flag_code)
            }
            "PaymentMethod" => label.parse::<PaymentMethod>().map(Self::payment_method_code),
            _ => {
                return Err(AppError::InvalidInput(format!(
                    "field '{}' has no categorical encoding",
                    field
                )))
            }
        };

        code.map(|c| c as f64).map_err(|_| {
            AppError::InvalidInput(format!(
                "unknown label '{}' for field '{}'",
                label, field
            ))
        })
    }

    pub fn gender_code(value: Gender) -> u32 {
        match value {
            Gender::F => 0,
            Gender::M => 1,
        }
    }

    pub fn marital_status_code(value: MaritalStatus) -> u32 {
        match value {
            MaritalStatus::Divorced => 0,
            MaritalStatus::Married => 1,
            MaritalStatus::Single => 2,
            MaritalStatus::Widowed => 3,
        }
    }

    pub fn income_level_code(value: IncomeLevel) -> u32 {
        match value {
            IncomeLevel::High => 0,
            IncomeLevel::Low => 1,
            IncomeLevel::Medium => 2,
        }
    }

    pub fn contract_code(value: Contract) -> u32 {
        match value {
            Contract::TwoYear => 0,
            Contract::MonthToMonth => 1,
            Contract::OneYear => 2,
        }
    }

    pub fn internet_service_code(value: InternetService) -> u32 {
        match value {
            InternetService::Dsl => 0,
            InternetService::FiberOptic => 1,
            InternetService::No => 2,
        }
    }

    pub fn service_flag_code(value: ServiceFlag) -> u32 {
        match value {
            ServiceFlag::No => 0,
            ServiceFlag::Yes => 1,
        }
    }

    pub fn payment_method_code(value: PaymentMethod) -> u32 {
        match value {
            PaymentMethod::BankTransfer => 0,
            PaymentMethod::CreditCard => 1,
            PaymentMethod::ElectronicCheck => 2,
            PaymentMethod::MailedCheck => 3,
        }
    }
}
