use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// One customer row as persisted in the dataset.
///
/// Column names mirror the dataset headers exactly; rows are immutable once
/// read. The `Churn` column is the binary attrition label (1 = churned).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct CustomerRow {
    #[serde(rename = "CustomerID")]
    pub customer_id: String,

    pub age: f64,

    pub gender: Gender,

    pub marital_status: MaritalStatus,

    pub income_level: IncomeLevel,

    pub monthly_charges: f64,

    pub tenure: f64,

    pub total_charges: f64,

    pub contract: Contract,

    pub internet_service: InternetService,

    pub online_security: ServiceFlag,

    pub tech_support: ServiceFlag,

    pub payment_method: PaymentMethod,

    pub churn: u8,
}

impl CustomerRow {
    /// Whether this customer churned
    pub fn churned(&self) -> bool {
        self.churn == 1
    }
}

/// Customer gender as recorded in the dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter)]
pub enum Gender {
    F,
    M,
}

/// Marital status categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter)]
pub enum MaritalStatus {
    Divorced,
    Married,
    Single,
    Widowed,
}

/// Income level categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter)]
pub enum IncomeLevel {
    High,
    Low,
    Medium,
}

/// Contract type categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter)]
pub enum Contract {
    #[serde(rename = "Month-to-month")]
    #[strum(serialize = "Month-to-month")]
    MonthToMonth,

    #[serde(rename = "One year")]
    #[strum(serialize = "One year")]
    OneYear,

    #[serde(rename = "Two year")]
    #[strum(serialize = "Two year")]
    TwoYear,
}

/// Internet service categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter)]
pub enum InternetService {
    #[serde(rename = "DSL")]
    #[strum(serialize = "DSL")]
    Dsl,

    #[serde(rename = "Fiber optic")]
    #[strum(serialize = "Fiber optic")]
    FiberOptic,

    No,
}

/// Yes/No flag for subscribed add-on services
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter)]
pub enum ServiceFlag {
    No,
    Yes,
}

/// Payment method categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter)]
pub enum PaymentMethod {
    #[serde(rename = "Bank transfer")]
    #[strum(serialize = "Bank transfer")]
    BankTransfer,

    #[serde(rename = "Credit card")]
    #[strum(serialize = "Credit card")]
    CreditCard,

    #[serde(rename = "Electronic check")]
    #[strum(serialize = "Electronic check")]
    ElectronicCheck,

    #[serde(rename = "Mailed check")]
    #[strum(serialize = "Mailed check")]
    MailedCheck,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_customer_row_csv_roundtrip() {
        let csv = "CustomerID,Age,Gender,MaritalStatus,IncomeLevel,MonthlyCharges,Tenure,TotalCharges,Contract,InternetService,OnlineSecurity,TechSupport,PaymentMethod,Churn\n\
                   C-001,42,M,Married,High,89.5,24,2148.0,Two year,Fiber optic,Yes,No,Credit card,0\n";

        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let row: CustomerRow = reader.deserialize().next().unwrap().unwrap();

        assert_eq!(row.customer_id, "C-001");
        assert_eq!(row.age, 42.0);
        assert_eq!(row.gender, Gender::M);
        assert_eq!(row.contract, Contract::TwoYear);
        assert_eq!(row.payment_method, PaymentMethod::CreditCard);
        assert!(!row.churned());
    }

    #[test]
    fn test_label_parsing_matches_dataset_spelling() {
        assert_eq!(
            Contract::from_str("Month-to-month").unwrap(),
            Contract::MonthToMonth
        );
        assert_eq!(
            InternetService::from_str("Fiber optic").unwrap(),
            InternetService::FiberOptic
        );
        assert_eq!(
            PaymentMethod::from_str("Electronic check").unwrap(),
            PaymentMethod::ElectronicCheck
        );
        assert!(Contract::from_str("month-to-month").is_err());
    }

    #[test]
    fn test_label_display_roundtrip() {
        assert_eq!(Contract::OneYear.to_string(), "One year");
        assert_eq!(InternetService::Dsl.to_string(), "DSL");
        assert_eq!(PaymentMethod::BankTransfer.to_string(), "Bank transfer");
        assert_eq!(Gender::F.to_string(), "F");
    }
}
