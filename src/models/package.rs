//! Service package catalog entries and package inquiries.

use crate::domain::{EmailAddress, MobileNumber};
use crate::models::forms::PackageForm;
use crate::validation::{
    validate_package_form, ValidationErrors, EMAIL_INVALID, MOBILE_INVALID,
};
use serde::{Deserialize, Serialize};

/// A package offered on the pricing page.
///
/// Catalog data is read-only for the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServicePackage {
    pub name: String,
    /// Display price, e.g. "৳15,000" or "Custom"
    pub price: String,
    pub description: String,
    /// Included features in display order
    pub features: Vec<String>,
    pub featured: bool,
}

/// Contact details entered in the package modal, validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserInfo {
    name: String,
    mobile: MobileNumber,
    email: EmailAddress,
    company: Option<String>,
}

impl UserInfo {
    /// Validate the modal form and build user info from it.
    ///
    /// Values are trimmed, the email lowercased, and a blank company dropped.
    pub fn from_form(form: &PackageForm) -> Result<Self, ValidationErrors> {
        let errors = validate_package_form(form);
        if !errors.is_empty() {
            return Err(errors);
        }

        let mobile = MobileNumber::new(form.mobile.as_str())
            .map_err(|_| ValidationErrors::single("mobile", MOBILE_INVALID))?;
        let email = EmailAddress::new(form.email.as_str())
            .map_err(|_| ValidationErrors::single("email", EMAIL_INVALID))?;
        let company = Some(form.company.trim())
            .filter(|company| !company.is_empty())
            .map(str::to_string);

        Ok(Self {
            name: form.name.trim().to_string(),
            mobile,
            email,
            company,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mobile(&self) -> &MobileNumber {
        &self.mobile
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn company(&self) -> Option<&str> {
        self.company.as_deref()
    }
}

/// A package selection together with the customer's details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageInquiry {
    package: ServicePackage,
    user: UserInfo,
}

impl PackageInquiry {
    pub fn new(package: ServicePackage, user: UserInfo) -> Self {
        Self { package, user }
    }

    pub fn package(&self) -> &ServicePackage {
        &self.package
    }

    pub fn user(&self) -> &UserInfo {
        &self.user
    }

    /// Build the record written to the datastore.
    pub fn to_record(&self, timestamp: i64, user_agent: Option<&str>) -> PackageInquiryRecord {
        PackageInquiryRecord {
            package_name: self.package.name.clone(),
            package_price: self.package.price.clone(),
            package_description: self.package.description.clone(),
            package_features: self.package.features.clone(),
            package_featured: self.package.featured,
            user_info: UserInfoRecord {
                name: self.user.name.clone(),
                email: self.user.email.as_str().to_string(),
                mobile: self.user.mobile.as_str().to_string(),
                company: self.user.company.clone(),
            },
            timestamp,
            status: "new".to_string(),
            kind: "package_inquiry".to_string(),
            source: "modal_form".to_string(),
            user_agent: user_agent.map(str::to_string),
            has_user_details: true,
            submission_method: "form_with_details".to_string(),
        }
    }
}

/// Customer details as stored inside a package inquiry record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfoRecord {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub company: Option<String>,
}

/// Package inquiry as stored under the `package_inquiries` path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageInquiryRecord {
    pub package_name: String,
    pub package_price: String,
    pub package_description: String,
    pub package_features: Vec<String>,
    pub package_featured: bool,
    pub user_info: UserInfoRecord,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
    pub status: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub source: String,
    pub user_agent: Option<String>,
    pub has_user_details: bool,
    pub submission_method: String,
}
