//! Prompt templates for the advisor and comparator flows.
//!
//! Both builders are pure: the same input always renders the same string, and neither can fail.
//! The response templates embedded here are requests to the model, the returned text is never
//! parsed against them.

use crate::catalog::InsuranceProduct;
use crate::profile::{ComparisonCriteria, UserProfile};

/// Rendered in place of empty specific needs
pub const NO_SPECIFIC_NEEDS: &str = "Ninguna especificada";
/// Rendered in place of an empty priority set
pub const NO_PRIORITIES: &str = "No especificadas";
/// Rendered in place of empty additional comments
pub const NO_COMMENTS: &str = "Ninguno";

/// Closes every product block in the comparator prompt
pub const PRODUCT_DIVIDER: &str = "-----------------------------------";

const ADVISOR_ROLE: &str = r#"Eres un asesor de seguros experto y amigable. Basado en los siguientes datos del usuario,
recomienda el tipo de seguro más adecuado y explica brevemente por qué.
También, sugiere posibles coberturas clave y consideraciones importantes."#;

const ADVISOR_GUIDANCE: &str = r#"Considera los siguientes puntos al generar la recomendación:
- ¿Qué tipo de seguro se alinea mejor con su edad, ocupación e ingresos?
- ¿Qué riesgos comunes podría enfrentar esta persona que un seguro podría mitigar?
- Si mencionó un tipo de seguro de interés, ¿cómo podemos profundizar en eso?
- Si tiene necesidades específicas, ¿cómo se pueden abordar?

Formato de la respuesta:
Recomendación de Seguro: [Tipo de Seguro Recomendado]
Por qué este seguro es adecuado: [Explicación concisa]
Coberturas Clave Sugeridas:
- [Cobertura 1]
- [Cobertura 2]
- [Cobertura 3]
Consideraciones Importantes: [Puntos adicionales a considerar]"#;

const COMPARATOR_ROLE: &str = r#"Eres un asistente de IA experto y neutral en seguros de vida. Tu tarea es analizar los requerimientos de un cliente y la información de varias pólizas de seguro de vida disponibles para recomendar la MEJOR OPCIÓN que se ajuste a sus necesidades.

**Directrices para la Recomendación:**
1.  Prioriza la opción que más se alinee con las necesidades explícitas del cliente (prioridades, duración, edad, ingresos).
2.  Si hay varias opciones buenas, puedes mencionar la siguiente mejor alternativa.
3.  Sé claro y conciso en la recomendación.
4.  Explica por qué la póliza recomendada es la mejor opción para el cliente.
5.  Siempre finaliza tu respuesta con una recomendación de que el cliente debe consultar con un asesor financiero certificado antes de tomar cualquier decisión.
6.  No inventes información sobre seguros no listados.
7.  Si no hay un ajuste claro, menciona la póliza más cercana y las razones, o indica que las opciones disponibles podrían no ajustarse perfectamente."#;

const COMPARATOR_TASK: &str = r#"Analiza cuidadosamente los "Seguros de Vida Disponibles" y los "Requerimientos del Cliente". Basado en esta información, selecciona LA MEJOR opción de seguro de vida para este cliente y justifica tu elección.

**Formato de Respuesta Deseado:**
---
### ✨ Tu Recomendación Personalizada: [Nombre del Seguro Recomendado]

**Aseguradora:** [Nombre de la Aseguradora]
**Tipo de Póliza:** [Tipo de póliza (Ej. Vida Entera, Término)]

**✅ Por qué este seguro es ideal para ti:**
[Explicación detallada de 2-3 puntos clave que conecten las necesidades del cliente con los beneficios del seguro.]

**🔍 Puntos Clave a Considerar:**
[Resume brevemente los principales beneficios y condiciones del seguro.]

**💰 Costo Ejemplo:** [Costo estimado del seguro]

---
**Importante:** Recuerda que esta es una recomendación basada en la información proporcionada. Te recomendamos encarecidamente **consultar a un asesor financiero certificado** para obtener un análisis personalizado y asegurarte de que la póliza se adapte perfectamente a tu situación específica."#;

/// Render the single-recommendation prompt for a submitted profile.
pub fn build_advisory_prompt(profile: &UserProfile) -> String {
    let needs = or_placeholder(&profile.specific_needs, NO_SPECIFIC_NEEDS);

    format!(
        r#"{ADVISOR_ROLE}

Datos del Usuario:
- Nombre: {name}
- Edad: {age}
- Ocupación: {occupation}
- Ingresos Mensuales: BOB {income}
- Tipo de Seguro de Interés: {insurance_type}
- Necesidades Específicas: {needs}

{ADVISOR_GUIDANCE}
"#,
        name = profile.name,
        age = profile.age,
        occupation = profile.occupation,
        income = profile.monthly_income,
        insurance_type = profile.insurance_type,
    )
}

/// Render the comparator prompt: directives, every product in `catalog` order, the client's
/// criteria, then the expected answer layout.
pub fn build_comparison_prompt(
    criteria: &ComparisonCriteria,
    catalog: &[InsuranceProduct],
) -> String {
    let products = catalog
        .iter()
        .map(render_product)
        .collect::<Vec<_>>()
        .concat();

    format!(
        "{COMPARATOR_ROLE}\n\n\
         --- Seguros de Vida Disponibles ---\n\
         {products}\n\
         {requirements}\n\
         {COMPARATOR_TASK}\n",
        requirements = render_criteria(criteria),
    )
}

fn render_product(product: &InsuranceProduct) -> String {
    format!(
        "**Nombre:** {}\n\
         **Aseguradora:** {}\n\
         **Tipo:** {}\n\
         **Beneficios Clave:** {}\n\
         **Condiciones Principales:** {}\n\
         **Costo Ejemplo:** {}\n\
         **Ideal Para:** {}\n\
         {PRODUCT_DIVIDER}\n",
        product.name,
        product.insurer,
        product.policy_type,
        product.benefits,
        product.conditions,
        product.example_cost,
        product.ideal_for,
    )
}

fn render_criteria(criteria: &ComparisonCriteria) -> String {
    let priorities = if criteria.priorities.is_empty() {
        NO_PRIORITIES.to_string()
    } else {
        criteria
            .priorities
            .iter()
            .map(|p| p.label())
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        "--- Requerimientos del Cliente ---\n\
         **Edad:** {} años\n\
         **Ingresos Anuales:** USD {}\n\
         **Duración de Cobertura Deseada:** {}\n\
         **Prioridades Clave:** {}\n\
         **Comentarios Adicionales:** {}\n",
        criteria.age,
        criteria.annual_income,
        criteria.coverage_duration,
        priorities,
        or_placeholder(&criteria.additional_comments, NO_COMMENTS),
    )
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() { placeholder } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::profile::{CoverageDuration, InsuranceType, Priority};

    fn ana() -> UserProfile {
        UserProfile {
            name: "Ana".to_string(),
            age: 40,
            occupation: "Chef".to_string(),
            monthly_income: 3000.0,
            insurance_type: InsuranceType::Health,
            specific_needs: String::new(),
        }
    }

    #[test]
    fn advisory_prompt_embeds_each_field_once() {
        let prompt = build_advisory_prompt(&ana());

        for value in ["Ana", "40", "Chef", "3000", "Salud"] {
            assert_eq!(prompt.matches(value).count(), 1, "value {value:?}");
        }
        assert!(prompt.contains(&format!("- Necesidades Específicas: {NO_SPECIFIC_NEEDS}")));
        assert!(!prompt.contains("Necesidades Específicas: \n"));
    }

    #[test]
    fn advisory_prompt_keeps_given_needs_verbatim() {
        let mut profile = ana();
        profile.specific_needs = "Cobertura dental para mis hijos".to_string();
        let prompt = build_advisory_prompt(&profile);

        assert!(prompt.contains("- Necesidades Específicas: Cobertura dental para mis hijos"));
        assert!(!prompt.contains(NO_SPECIFIC_NEEDS));
    }

    #[test]
    fn advisory_prompt_requests_three_coverages() {
        let prompt = build_advisory_prompt(&ana());
        assert!(prompt.contains("Recomendación de Seguro:"));
        assert!(prompt.contains("- [Cobertura 3]"));
        assert!(prompt.contains("Consideraciones Importantes:"));
    }

    #[test]
    fn comparison_prompt_lists_catalog_in_order() {
        let catalog = Catalog::builtin();
        let prompt = build_comparison_prompt(&ComparisonCriteria::default(), catalog.products());

        assert_eq!(prompt.matches("**Nombre:**").count(), 4);
        assert_eq!(prompt.matches(PRODUCT_DIVIDER).count(), 4);
        assert_eq!(prompt.matches(NO_PRIORITIES).count(), 1);
        assert!(prompt.contains(&format!("**Comentarios Adicionales:** {NO_COMMENTS}")));

        let positions: Vec<usize> = catalog
            .products()
            .iter()
            .map(|p| prompt.find(&format!("**Nombre:** {}", p.name)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn comparison_prompt_sections_are_ordered() {
        let prompt =
            build_comparison_prompt(&ComparisonCriteria::default(), Catalog::builtin().products());

        let role = prompt.find("**Directrices para la Recomendación:**").unwrap();
        let products = prompt.find("--- Seguros de Vida Disponibles ---").unwrap();
        let requirements = prompt.find("--- Requerimientos del Cliente ---").unwrap();
        let task = prompt.find("**Formato de Respuesta Deseado:**").unwrap();
        assert!(role < products && products < requirements && requirements < task);
        assert!(prompt.contains("7.  Si no hay un ajuste claro"));
        assert!(prompt.contains("consultar a un asesor financiero certificado"));
    }

    #[test]
    fn comparison_prompt_renders_criteria() {
        let criteria = ComparisonCriteria {
            age: 52,
            annual_income: 45000.0,
            coverage_duration: CoverageDuration::Long,
            priorities: [Priority::Flexibility, Priority::LowCost].into_iter().collect(),
            additional_comments: "Tengo una hipoteca".to_string(),
        };
        let prompt = build_comparison_prompt(&criteria, Catalog::builtin().products());

        assert!(prompt.contains("**Edad:** 52 años"));
        assert!(prompt.contains("**Ingresos Anuales:** USD 45000"));
        assert!(prompt.contains("**Duración de Cobertura Deseada:** Larga (ej. 30+ años o de por vida)"));
        assert!(prompt.contains("**Prioridades Clave:** Costo bajo, Flexibilidad"));
        assert!(prompt.contains("**Comentarios Adicionales:** Tengo una hipoteca"));
        assert!(!prompt.contains(NO_PRIORITIES));
        assert!(!prompt.contains(&format!("**Comentarios Adicionales:** {NO_COMMENTS}")));
    }

    #[test]
    fn comparison_prompt_with_empty_catalog_keeps_template() {
        let prompt = build_comparison_prompt(&ComparisonCriteria::default(), &[]);

        assert_eq!(prompt.matches("**Nombre:**").count(), 0);
        assert!(prompt.contains("--- Seguros de Vida Disponibles ---"));
        assert!(prompt.contains("--- Requerimientos del Cliente ---"));
        assert!(prompt.contains("**Formato de Respuesta Deseado:**"));
    }

    #[test]
    fn builders_are_deterministic() {
        let profile = ana();
        assert_eq!(build_advisory_prompt(&profile), build_advisory_prompt(&profile));

        let criteria = ComparisonCriteria::default();
        let catalog = Catalog::builtin();
        assert_eq!(
            build_comparison_prompt(&criteria, catalog.products()),
            build_comparison_prompt(&criteria, catalog.products())
        );
    }
}
