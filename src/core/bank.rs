use serde::Serialize;

use super::money::Amount;

/// Bank account and amount for cash on delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankData {
    pub account_holder: String,
    pub bank_name: String,
    pub iban: String,
    pub bic: Option<String>,
    pub transfer_note1: Option<String>,
    pub transfer_note2: Option<String>,
    pub account_reference: Option<String>,
    /// Amount to collect from the consignee.
    pub amount: Amount,
}

impl BankData {
    pub fn new(
        account_holder: impl Into<String>,
        bank_name: impl Into<String>,
        iban: impl Into<String>,
        amount: Amount,
    ) -> Self {
        Self {
            account_holder: account_holder.into(),
            bank_name: bank_name.into(),
            iban: iban.into(),
            bic: None,
            transfer_note1: None,
            transfer_note2: None,
            account_reference: None,
            amount,
        }
    }

    pub fn bic(mut self, bic: impl Into<String>) -> Self {
        self.bic = Some(bic.into());
        self
    }

    pub fn transfer_notes(mut self, note1: impl Into<String>, note2: Option<String>) -> Self {
        self.transfer_note1 = Some(note1.into());
        self.transfer_note2 = note2;
        self
    }

    pub fn account_reference(mut self, reference: impl Into<String>) -> Self {
        self.account_reference = Some(reference.into());
        self
    }

    pub fn to_wire(&self) -> CashOnDeliveryWire<'_> {
        CashOnDeliveryWire {
            bank_account: BankAccountWire {
                account_holder: &self.account_holder,
                bank_name: &self.bank_name,
                iban: &self.iban,
                bic: self.bic.as_deref(),
            },
            account_reference: self.account_reference.as_deref(),
            transfer_note1: self.transfer_note1.as_deref(),
            transfer_note2: self.transfer_note2.as_deref(),
            amount: &self.amount,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CashOnDeliveryWire<'a> {
    bank_account: BankAccountWire<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    account_reference: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    transfer_note1: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    transfer_note2: Option<&'a str>,
    amount: &'a Amount,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BankAccountWire<'a> {
    account_holder: &'a str,
    bank_name: &'a str,
    iban: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    bic: Option<&'a str>,
}
