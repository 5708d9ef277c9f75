//! Prediction form: raw field input, validation, normalized output
//!
//! Validation errors are field-scoped and never leave the form; the submit
//! callback only ever sees a fully valid [`PropertyAttributes`].

use crate::models::PropertyAttributes;
use std::collections::BTreeMap;

/// Form fields in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum FormField {
    #[default]
    City,
    Area,
    Rooms,
    Bathroom,
    ParkingSpaces,
    Floor,
    Animal,
    Furniture,
    Hoa,
    PropertyTax,
    FireInsurance,
}

impl FormField {
    pub fn all() -> &'static [FormField] {
        &[
            FormField::City,
            FormField::Area,
            FormField::Rooms,
            FormField::Bathroom,
            FormField::ParkingSpaces,
            FormField::Floor,
            FormField::Animal,
            FormField::Furniture,
            FormField::Hoa,
            FormField::PropertyTax,
            FormField::FireInsurance,
        ]
    }

    pub fn index(self) -> usize {
        Self::all().iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn from_index(idx: usize) -> Self {
        Self::all().get(idx).copied().unwrap_or(FormField::City)
    }

    pub fn next(self) -> Self {
        Self::from_index((self.index() + 1) % Self::all().len())
    }

    pub fn prev(self) -> Self {
        let len = Self::all().len();
        Self::from_index((self.index() + len - 1) % len)
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::City => "City",
            FormField::Area => "Area (m²)",
            FormField::Rooms => "Number of Rooms",
            FormField::Bathroom => "Number of Bathrooms",
            FormField::ParkingSpaces => "Parking Spaces",
            FormField::Floor => "Floor",
            FormField::Animal => "Animals Allowed",
            FormField::Furniture => "Furnished",
            FormField::Hoa => "HOA (R$)",
            FormField::PropertyTax => "Property Tax (R$)",
            FormField::FireInsurance => "Fire Insurance (R$)",
        }
    }

    /// On/off switches rather than text inputs
    pub fn is_toggle(self) -> bool {
        matches!(self, FormField::Animal | FormField::Furniture)
    }

    pub fn is_numeric(self) -> bool {
        !self.is_toggle() && self != FormField::City
    }

    /// Message recorded when the field is missing or invalid
    pub fn error_message(self) -> &'static str {
        match self {
            FormField::City => "City is required",
            FormField::Area => "Valid area is required",
            FormField::Rooms => "Valid number of rooms is required",
            FormField::Bathroom => "Valid number of bathrooms is required",
            FormField::ParkingSpaces => "Valid number of parking spaces is required",
            FormField::Floor => "Valid floor number is required",
            FormField::Hoa => "Valid HOA amount is required",
            FormField::PropertyTax => "Valid property tax amount is required",
            FormField::FireInsurance => "Valid fire insurance amount is required",
            FormField::Animal | FormField::Furniture => "",
        }
    }
}

/// Field-scoped validation errors
pub type FormErrors = BTreeMap<FormField, String>;

/// Raw form input plus the errors from the last submit attempt
#[derive(Debug, Clone, Default)]
pub struct PropertyForm {
    texts: BTreeMap<FormField, String>,
    animal: bool,
    furniture: bool,
    errors: FormErrors,
}

impl PropertyForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text of a text field (`None` for toggles)
    pub fn text(&self, field: FormField) -> Option<&str> {
        if field.is_toggle() {
            return None;
        }
        Some(self.texts.get(&field).map(String::as_str).unwrap_or(""))
    }

    /// Replace a text field's content; ignored for toggles
    pub fn set_text(&mut self, field: FormField, value: impl Into<String>) {
        if !field.is_toggle() {
            self.texts.insert(field, value.into());
        }
    }

    pub fn push_char(&mut self, field: FormField, ch: char) {
        if !field.is_toggle() {
            self.texts.entry(field).or_default().push(ch);
        }
    }

    pub fn pop_char(&mut self, field: FormField) {
        if let Some(text) = self.texts.get_mut(&field) {
            text.pop();
        }
    }

    /// Current switch state (`None` for text fields)
    pub fn flag(&self, field: FormField) -> Option<bool> {
        match field {
            FormField::Animal => Some(self.animal),
            FormField::Furniture => Some(self.furniture),
            _ => None,
        }
    }

    pub fn set_flag(&mut self, field: FormField, value: bool) {
        match field {
            FormField::Animal => self.animal = value,
            FormField::Furniture => self.furniture = value,
            _ => {}
        }
    }

    pub fn toggle(&mut self, field: FormField) {
        if let Some(current) = self.flag(field) {
            self.set_flag(field, !current);
        }
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn error(&self, field: FormField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Validate every field; collects one error per offending field
    pub fn validate(&self) -> Result<PropertyAttributes, FormErrors> {
        let mut errors = FormErrors::new();

        let city = self.text(FormField::City).unwrap_or("").trim().to_string();
        if city.is_empty() {
            errors.insert(FormField::City, FormField::City.error_message().to_string());
        }

        let mut number = |field: FormField| -> f64 {
            match parse_number(self.text(field).unwrap_or("")) {
                Some(v) => v,
                None => {
                    errors.insert(field, field.error_message().to_string());
                    0.0
                }
            }
        };

        let area = number(FormField::Area);
        let rooms = number(FormField::Rooms);
        let bathroom = number(FormField::Bathroom);
        let parking_spaces = number(FormField::ParkingSpaces);
        let floor = number(FormField::Floor);
        let hoa = number(FormField::Hoa);
        let property_tax = number(FormField::PropertyTax);
        let fire_insurance = number(FormField::FireInsurance);

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(PropertyAttributes {
            city,
            area,
            rooms,
            bathroom,
            parking_spaces,
            floor,
            animal: self.animal,
            furniture: self.furniture,
            hoa,
            property_tax,
            fire_insurance,
        })
    }

    /// Validate and, only if valid, hand the attributes to `on_submit` once.
    /// Returns whether the callback ran.
    pub fn submit<F>(&mut self, on_submit: F) -> bool
    where
        F: FnOnce(PropertyAttributes),
    {
        match self.validate() {
            Ok(attrs) => {
                self.errors.clear();
                on_submit(attrs);
                true
            }
            Err(errors) => {
                tracing::debug!(invalid = errors.len(), "Prediction form rejected");
                self.errors = errors;
                false
            }
        }
    }
}

/// Required finite number; surrounding whitespace ignored
fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}
