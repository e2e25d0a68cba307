use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{AdvisorError, Result};

/// A life insurance product offered by the comparator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuranceProduct {
    pub name: String,
    pub insurer: String,
    pub policy_type: String,
    pub benefits: String,
    pub conditions: String,
    pub example_cost: String,
    pub ideal_for: String,
}

/// Read-only list of products, loaded once at startup and shared across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    products: Vec<InsuranceProduct>,
}

impl Catalog {
    pub fn new(products: Vec<InsuranceProduct>) -> Self {
        Self { products }
    }

    /// The four life insurance policies shipped with the comparator.
    pub fn builtin() -> Self {
        Self::new(vec![
            product(
                "Póliza SeguraVida Clásica",
                "GlobalProtect S.A.",
                "Vida Entera",
                "Cobertura vitalicia, acumula valor en efectivo garantizado, elegible para dividendos.",
                "Edad de contratación 18-65 años, requiere examen médico, primas fijas.",
                "USD 80/mes (para persona de 30 años, no fumadora)",
                "Personas que buscan cobertura permanente, ahorro a largo plazo, planificación patrimonial.",
            ),
            product(
                "Plan Futuro Brillante",
                "AseguraMás Vida",
                "Término (20 años)",
                "Cobertura por 20 años, prima baja, posibilidad de conversión a vida entera.",
                "Edad de contratación 20-55 años, posible examen médico simplificado, primas fijas durante el término.",
                "USD 35/mes (para persona de 30 años, no fumadora)",
                "Familias jóvenes con hijos pequeños, personas con hipotecas, aquellos que necesitan cobertura por un período específico.",
            ),
            product(
                "Seguro Legado Duradero",
                "Patrimonio Seguro",
                "Vida Entera (con beneficios acelerados)",
                "Cobertura vitalicia, valor en efectivo, acceso anticipado a beneficios en caso de enfermedad terminal.",
                "Edad de contratación 25-60 años, examen médico, primas fijas.",
                "USD 100/mes (para persona de 30 años, no fumadora)",
                "Quienes buscan seguridad a largo plazo y protección adicional ante enfermedades graves.",
            ),
            product(
                "Cobertura Express",
                "Protección Rápida",
                "Término (10 años)",
                "Proceso de aplicación rápido, sin examen médico (hasta cierto monto), cobertura básica por 10 años.",
                "Edad de contratación 20-50 años, primas fijas, límite de cobertura.",
                "USD 25/mes (para persona de 30 años, no fumadora)",
                "Quienes necesitan cobertura rápida y básica, sin complicaciones.",
            ),
        ])
    }

    /// Parse a JSON array of products. Order in the document is kept.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let products: Vec<InsuranceProduct> = serde_json::from_str(raw)
            .map_err(|e| AdvisorError::Catalog(format!("invalid catalog JSON: {}", e)))?;
        Ok(Self::new(products))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AdvisorError::Catalog(format!("failed to read {}: {}", path.display(), e))
        })?;
        let catalog = Self::from_json_str(&raw)?;
        info!(
            path = %path.display(),
            products = catalog.len(),
            "Loaded product catalog"
        );
        Ok(catalog)
    }

    pub fn products(&self) -> &[InsuranceProduct] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn product(
    name: &str,
    insurer: &str,
    policy_type: &str,
    benefits: &str,
    conditions: &str,
    example_cost: &str,
    ideal_for: &str,
) -> InsuranceProduct {
    InsuranceProduct {
        name: name.to_string(),
        insurer: insurer.to_string(),
        policy_type: policy_type.to_string(),
        benefits: benefits.to_string(),
        conditions: conditions.to_string(),
        example_cost: example_cost.to_string(),
        ideal_for: ideal_for.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_has_four_products_in_order() {
        let catalog = Catalog::builtin();
        let names: Vec<&str> = catalog.products().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Póliza SeguraVida Clásica",
                "Plan Futuro Brillante",
                "Seguro Legado Duradero",
                "Cobertura Express",
            ]
        );
    }

    #[test]
    fn json_catalog_keeps_document_order() {
        let raw = r#"[
            {"name": "B", "insurer": "i", "policy_type": "t", "benefits": "b",
             "conditions": "c", "example_cost": "e", "ideal_for": "f"},
            {"name": "A", "insurer": "i", "policy_type": "t", "benefits": "b",
             "conditions": "c", "example_cost": "e", "ideal_for": "f"}
        ]"#;
        let catalog = Catalog::from_json_str(raw).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.products()[0].name, "B");
        assert_eq!(catalog.products()[1].name, "A");
    }

    #[test]
    fn malformed_json_is_a_catalog_error() {
        let err = Catalog::from_json_str(r#"[{"name": "missing fields"}]"#).unwrap_err();
        assert!(matches!(err, AdvisorError::Catalog(_)));
    }

    #[test]
    fn missing_file_is_a_catalog_error() {
        let err = Catalog::from_path("/nonexistent/catalog.json").unwrap_err();
        assert!(matches!(err, AdvisorError::Catalog(_)));
    }
}
