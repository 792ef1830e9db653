//! # Return Document Serialization
//!
//! Renders a built return to its two portable representations: an
//! XML-shaped element tree (the department's e-filing shape) and a JSON
//! document. Both are projections of the **same** element tree, so the two
//! outputs cannot drift: the JSON field names are the lowerCamelCase
//! projection of the XML element names, and the values are identical text.
//!
//! ## JSON Projection Rules
//!
//! - An element with children projects to an object keyed by
//!   lowerCamelCase child names.
//! - Children sharing a name project as an array, in document order.
//! - A leaf element projects to its text (empty string when empty).

use serde::{Deserialize, Serialize};

use crate::builder::{FormPayload, ItrFormData};

/// One element of the XML-shaped document tree: a name, optional text,
/// and child elements. No attributes — the e-filing shape is element-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XmlElement {
    /// Element name (UpperCamelCase).
    pub name: String,
    /// Text content for leaf elements.
    pub text: Option<String>,
    /// Child elements, in document order.
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    /// Create an empty container element.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Create a leaf element with text content.
    pub fn leaf(name: impl Into<String>, text: impl ToString) -> Self {
        Self {
            name: name.into(),
            text: Some(text.to_string()),
            children: Vec::new(),
        }
    }

    /// Append a child element (builder style).
    pub fn with(mut self, child: XmlElement) -> Self {
        self.children.push(child);
        self
    }

    /// Append a child element.
    pub fn push(&mut self, child: XmlElement) {
        self.children.push(child);
    }

    /// Find the first direct child with the given name.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Render the tree as an indented XML document with declaration.
    pub fn render(&self) -> String {
        let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        self.write_into(&mut out, 0);
        out
    }

    fn write_into(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        match (&self.text, self.children.is_empty()) {
            (Some(text), true) if text.is_empty() => {
                out.push_str(&format!("{indent}<{}/>\n", self.name));
            }
            (Some(text), true) => {
                out.push_str(&format!(
                    "{indent}<{}>{}</{}>\n",
                    self.name,
                    escape_text(text),
                    self.name
                ));
            }
            (None, true) => {
                out.push_str(&format!("{indent}<{}/>\n", self.name));
            }
            _ => {
                out.push_str(&format!("{indent}<{}>\n", self.name));
                for child in &self.children {
                    child.write_into(out, depth + 1);
                }
                out.push_str(&format!("{indent}</{}>\n", self.name));
            }
        }
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Project an element name to its canonical lowerCamelCase JSON key.
fn json_key(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Project an element tree to its JSON document.
///
/// The root element's children become the top-level object; the root name
/// itself is not keyed.
pub fn project_json(element: &XmlElement) -> serde_json::Value {
    if element.children.is_empty() {
        return serde_json::Value::String(element.text.clone().unwrap_or_default());
    }

    // Group children by name, preserving first-occurrence order.
    let mut groups: Vec<(String, Vec<serde_json::Value>)> = Vec::new();
    for child in &element.children {
        let key = json_key(&child.name);
        let value = project_json(child);
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, values)) => values.push(value),
            None => groups.push((key, vec![value])),
        }
    }

    let mut object = serde_json::Map::new();
    for (key, mut values) in groups {
        let value = if values.len() == 1 {
            values.remove(0)
        } else {
            serde_json::Value::Array(values)
        };
        object.insert(key, value);
    }
    serde_json::Value::Object(object)
}

/// The rendered return documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItrDocuments {
    /// Indented XML document.
    pub xml: String,
    /// JSON document projected from the same tree.
    pub json: serde_json::Value,
}

/// Build the element tree for a return.
pub fn to_element_tree(data: &ItrFormData) -> XmlElement {
    let mut root = XmlElement::new("ItrReturn")
        .with(XmlElement::leaf("FormType", data.form_type.form_name()))
        .with(XmlElement::leaf("DocumentId", data.common.document_id))
        .with(XmlElement::leaf(
            "GeneratedAt",
            data.common.generated_at.to_rfc3339(),
        ))
        .with(XmlElement::leaf(
            "FinancialYear",
            data.common.financial_year.as_str(),
        ))
        .with(XmlElement::leaf(
            "AssessmentYear",
            &data.common.assessment_year,
        ))
        .with(XmlElement::leaf("Regime", data.common.regime))
        .with(
            XmlElement::new("Taxpayer")
                .with(XmlElement::leaf("Pan", &data.common.pan))
                .with(XmlElement::leaf("Name", &data.common.name))
                .with(XmlElement::leaf("Address", &data.common.address))
                .with(XmlElement::leaf(
                    "BankAccountNumber",
                    &data.common.bank.account_number,
                ))
                .with(XmlElement::leaf("BankIfsc", &data.common.bank.ifsc)),
        );

    let settlement = &data.summary.settlement;
    root.push(
        XmlElement::new("TaxSummary")
            .with(XmlElement::leaf(
                "GrossTotalIncome",
                data.summary.gross_total_income,
            ))
            .with(XmlElement::leaf("TaxableIncome", data.summary.taxable_income))
            .with(XmlElement::leaf(
                "TotalTaxLiability",
                data.summary.total_tax_liability,
            ))
            .with(XmlElement::leaf(
                "TotalTaxesPaid",
                data.summary.total_taxes_paid,
            ))
            .with(XmlElement::leaf("RefundAmount", settlement.refund_amount))
            .with(XmlElement::leaf("AdditionalDue", settlement.additional_due))
            .with(XmlElement::leaf("IsRefund", settlement.is_refund)),
    );

    let tds = &data.summary.tds;
    let mut tds_element = XmlElement::new("TdsBreakdown").with(XmlElement::leaf(
        "AnnualDeclared",
        tds.annual_declared,
    ));
    for amount in tds.quarterly.iter() {
        tds_element.push(XmlElement::leaf("Quarter", amount));
    }
    tds_element.push(XmlElement::leaf("QuarterlyTotal", tds.quarterly_total));
    root.push(tds_element);

    root.push(payload_element(data));
    root
}

fn payload_element(data: &ItrFormData) -> XmlElement {
    match data.payload {
        FormPayload::Itr1(ref p) => {
            let mut schedule = XmlElement::new("Itr1Schedule")
                .with(XmlElement::leaf("SalaryIncome", p.salary_income))
                .with(XmlElement::leaf(
                    "HousePropertyIncome",
                    p.house_property_income,
                ))
                .with(XmlElement::leaf(
                    "OtherSourcesIncome",
                    p.other_sources_income,
                ));
            if let Some(ref employer) = p.employer {
                schedule.push(
                    XmlElement::new("Employer")
                        .with(XmlElement::leaf("EmployerName", &employer.employer_name))
                        .with(XmlElement::leaf("Tan", &employer.tan))
                        .with(XmlElement::leaf("SalaryPaid", employer.salary_paid))
                        .with(XmlElement::leaf("TdsDeducted", employer.tds_deducted)),
                );
            }
            if let Some(ref property) = p.property {
                schedule.push(
                    XmlElement::new("Property")
                        .with(XmlElement::leaf("Address", &property.address))
                        .with(XmlElement::leaf("AnnualValue", property.annual_value))
                        .with(XmlElement::leaf(
                            "IsSelfOccupied",
                            property.is_self_occupied,
                        )),
                );
            }
            schedule
        }
        FormPayload::Itr2(ref p) => {
            let mut schedule = XmlElement::new("Itr2Schedule")
                .with(XmlElement::leaf("SalaryIncome", p.salary_income))
                .with(XmlElement::leaf(
                    "HousePropertyIncome",
                    p.house_property_income,
                ))
                .with(XmlElement::leaf(
                    "CapitalGainsIncome",
                    p.capital_gains_income,
                ))
                .with(XmlElement::leaf(
                    "OtherSourcesIncome",
                    p.other_sources_income,
                ));
            for employer in &p.employers {
                schedule.push(
                    XmlElement::new("Employer")
                        .with(XmlElement::leaf("EmployerName", &employer.employer_name))
                        .with(XmlElement::leaf("Tan", &employer.tan))
                        .with(XmlElement::leaf("SalaryPaid", employer.salary_paid))
                        .with(XmlElement::leaf("TdsDeducted", employer.tds_deducted)),
                );
            }
            for property in &p.properties {
                schedule.push(
                    XmlElement::new("Property")
                        .with(XmlElement::leaf("Address", &property.address))
                        .with(XmlElement::leaf("AnnualValue", property.annual_value))
                        .with(XmlElement::leaf(
                            "IsSelfOccupied",
                            property.is_self_occupied,
                        )),
                );
            }
            for gain in &p.capital_gains {
                schedule.push(
                    XmlElement::new("CapitalGain")
                        .with(XmlElement::leaf("Description", &gain.description))
                        .with(XmlElement::leaf("Gain", gain.gain))
                        .with(XmlElement::leaf("IsLongTerm", gain.is_long_term)),
                );
            }
            for asset in &p.foreign_assets {
                schedule.push(
                    XmlElement::new("ForeignAsset")
                        .with(XmlElement::leaf("Country", &asset.country))
                        .with(XmlElement::leaf("Description", &asset.description))
                        .with(XmlElement::leaf("Value", asset.value)),
                );
            }
            schedule
        }
    }
}

/// Render both documents from one element tree.
pub fn serialize(data: &ItrFormData) -> ItrDocuments {
    let tree = to_element_tree(data);
    ItrDocuments {
        xml: tree.render(),
        json: project_json(&tree),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build;
    use crate::eligibility::ItrType;
    use crate::facts::{
        AdditionalInfo, EmployerTds, IncomeFacts, ResidencyStatus, TaxpayerCategory,
    };
    use itr_config::{Regime, TaxConfigRegistry};
    use itr_core::FinancialYear;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn sample() -> ItrFormData {
        let facts = IncomeFacts {
            financial_year: FinancialYear::new("2023-24").unwrap(),
            age: 30,
            salary_income: dec!(1200000),
            house_property_income: Decimal::ZERO,
            house_property_count: 0,
            capital_gains_income: Decimal::ZERO,
            business_income: Decimal::ZERO,
            other_sources_income: Decimal::ZERO,
            has_foreign_income: false,
            has_foreign_assets: false,
            is_company_director: false,
            holds_unlisted_shares: false,
            category: TaxpayerCategory::Individual,
            residency: ResidencyStatus::Resident,
        };
        let info = AdditionalInfo {
            pan: "ABCPE1234F".into(),
            name: "Asha Rao".into(),
            address: "12 MG Road".into(),
            bank_account_number: "001234567890".into(),
            bank_ifsc: "HDFC0001234".into(),
            regime: Regime::New,
            employers: vec![
                EmployerTds {
                    employer_name: "Acme & Sons <Pvt> Ltd".into(),
                    tan: "BLRA01234C".into(),
                    salary_paid: dec!(700000),
                    tds_deducted: dec!(50000),
                },
                EmployerTds {
                    employer_name: "Beta Labs".into(),
                    tan: "BLRB04321D".into(),
                    salary_paid: dec!(500000),
                    tds_deducted: dec!(40000),
                },
            ],
            properties: vec![],
            capital_gain_entries: vec![],
            foreign_assets: vec![],
            annual_tds: dec!(90000),
            quarterly_tds: [dec!(22500); 4],
            advance_tax_paid: Decimal::ZERO,
            self_assessment_tax_paid: Decimal::ZERO,
        };
        build(
            &TaxConfigRegistry::builtin(),
            &facts,
            &info,
            ItrType::Itr2,
        )
        .unwrap()
    }

    // -- XML rendering --

    #[test]
    fn xml_has_declaration_and_root() {
        let documents = serialize(&sample());
        assert!(documents.xml.starts_with("<?xml version=\"1.0\""));
        assert!(documents.xml.contains("<ItrReturn>"));
        assert!(documents.xml.trim_end().ends_with("</ItrReturn>"));
    }

    #[test]
    fn xml_escapes_text() {
        let documents = serialize(&sample());
        assert!(documents.xml.contains("Acme &amp; Sons &lt;Pvt&gt; Ltd"));
        assert!(!documents.xml.contains("<Pvt>"));
    }

    #[test]
    fn xml_empty_leaf_self_closes() {
        let element = XmlElement::leaf("Address", "");
        assert!(element.render().contains("<Address/>"));
    }

    // -- JSON projection --

    #[test]
    fn json_keys_are_lower_camel_projections() {
        let documents = serialize(&sample());
        let json = &documents.json;
        assert!(json.get("formType").is_some());
        assert!(json.get("taxSummary").is_some());
        assert!(json["taxpayer"].get("bankIfsc").is_some());
        assert!(json["tdsBreakdown"].get("annualDeclared").is_some());
    }

    #[test]
    fn repeated_elements_project_as_arrays() {
        let documents = serialize(&sample());
        let quarters = &documents.json["tdsBreakdown"]["quarter"];
        assert_eq!(quarters.as_array().unwrap().len(), 4);
        let employers = &documents.json["itr2Schedule"]["employer"];
        assert_eq!(employers.as_array().unwrap().len(), 2);
        assert_eq!(employers[1]["employerName"], "Beta Labs");
    }

    // -- cross-document equivalence --

    #[test]
    fn xml_and_json_carry_identical_values() {
        let data = sample();
        let tree = to_element_tree(&data);
        let documents = serialize(&data);

        // Same tree feeds both renderings; spot-check the computed fields
        // end to end.
        let summary = tree.child("TaxSummary").unwrap();
        let liability_xml = summary
            .child("TotalTaxLiability")
            .and_then(|e| e.text.clone())
            .unwrap();
        assert_eq!(
            documents.json["taxSummary"]["totalTaxLiability"],
            liability_xml.as_str()
        );
        assert_eq!(liability_xml, data.summary.total_tax_liability.to_string());

        let refund_xml = summary
            .child("RefundAmount")
            .and_then(|e| e.text.clone())
            .unwrap();
        assert_eq!(
            documents.json["taxSummary"]["refundAmount"],
            refund_xml.as_str()
        );
    }

    #[test]
    fn documents_roundtrip_equivalent_settlement() {
        let data = sample();
        let documents = serialize(&data);
        let json_refund: Decimal = documents.json["taxSummary"]["refundAmount"]
            .as_str()
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(json_refund, data.summary.settlement.refund_amount);
        assert!(documents
            .xml
            .contains(&format!("<RefundAmount>{json_refund}</RefundAmount>")));
    }

    // -- element helpers --

    #[test]
    fn child_lookup_finds_first() {
        let tree = XmlElement::new("Root")
            .with(XmlElement::leaf("A", "1"))
            .with(XmlElement::leaf("A", "2"));
        assert_eq!(tree.child("A").unwrap().text.as_deref(), Some("1"));
        assert!(tree.child("B").is_none());
    }

    #[test]
    fn leaf_projects_to_text() {
        let leaf = XmlElement::leaf("Name", "Asha");
        assert_eq!(project_json(&leaf), serde_json::json!("Asha"));
    }
}
