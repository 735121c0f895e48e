//! Typed input row and prediction output.

use super::schema::Field;

/// Value of a single record field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldValue<'a> {
    Category(&'a str),
    Number(f32),
    /// Label field on an inference row.
    Missing,
}

/// One training or inference row.
///
/// `target_price` is `None` for inference rows; it never feeds the features.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PriceRecord {
    pub property_code: String,
    pub discount_code: String,
    pub property_count: f32,
    pub loan_value: f32,
    /// Present in source data, unused by the model.
    pub floor_price: f32,
    pub payment_type: String,
    pub target_price: Option<f32>,
}

impl PriceRecord {
    /// Create an unlabeled record.
    pub fn new(
        property_code: impl Into<String>,
        discount_code: impl Into<String>,
        property_count: f32,
        loan_value: f32,
        floor_price: f32,
        payment_type: impl Into<String>,
    ) -> Self {
        Self {
            property_code: property_code.into(),
            discount_code: discount_code.into(),
            property_count,
            loan_value,
            floor_price,
            payment_type: payment_type.into(),
            target_price: None,
        }
    }

    /// Attach a label.
    pub fn with_target(mut self, target_price: f32) -> Self {
        self.target_price = Some(target_price);
        self
    }

    /// Read a field by its schema identity.
    pub fn value(&self, field: Field) -> FieldValue<'_> {
        match field {
            Field::PropertyCode => FieldValue::Category(&self.property_code),
            Field::DiscountCode => FieldValue::Category(&self.discount_code),
            Field::PaymentType => FieldValue::Category(&self.payment_type),
            Field::PropertyCount => FieldValue::Number(self.property_count),
            Field::LoanValue => FieldValue::Number(self.loan_value),
            Field::FloorPrice => FieldValue::Number(self.floor_price),
            Field::TargetPrice => self
                .target_price
                .map_or(FieldValue::Missing, FieldValue::Number),
        }
    }

    /// Categorical value of `field`, if it is a categorical field.
    pub fn category(&self, field: Field) -> Option<&str> {
        match self.value(field) {
            FieldValue::Category(value) => Some(value),
            _ => None,
        }
    }

    pub(crate) fn set_category(&mut self, field: Field, value: &str) {
        let slot = match field {
            Field::PropertyCode => &mut self.property_code,
            Field::DiscountCode => &mut self.discount_code,
            Field::PaymentType => &mut self.payment_type,
            _ => return,
        };
        value.clone_into(slot);
    }

    pub(crate) fn set_number(&mut self, field: Field, value: f32) {
        match field {
            Field::PropertyCount => self.property_count = value,
            Field::LoanValue => self.loan_value = value,
            Field::FloorPrice => self.floor_price = value,
            Field::TargetPrice => self.target_price = Some(value),
            _ => {}
        }
    }
}

/// A scored record, used for reporting.
#[derive(Clone, Debug, PartialEq)]
pub struct Prediction {
    /// The input record as given.
    pub record: PriceRecord,
    /// Predicted price.
    pub score: f32,
}
