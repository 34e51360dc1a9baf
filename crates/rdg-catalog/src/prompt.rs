//! Prompts for the external text generator and the round trip through it.

use rdg_model::FieldRecord;
use tracing::info;

use crate::error::{CatalogError, Result};
use crate::spec_json::{parse_generated_spec, to_spec_json};

/// Opaque text-generation collaborator.
///
/// Implementations receive the system and user prompt and return raw text
/// that is expected to hold a JSON array of spec entries.
pub trait TextGenerator {
    fn generate(&self, system_prompt: &str, user_prompt: &str) -> anyhow::Result<String>;
}

const SYSTEM_PROMPT: &str = r#"You produce the sheet specification for one RDG chosen by the user.
The field records supplied with the request are the only source of truth.

Rules:
1. Use only the supplied records. Never invent, rename or drop fields; keep every mandatory field.
2. Reply with a JSON array only. Each item has the shape
   {"position": <number>, "excel_header": "<header>", "mandatory": true|false,
    "datatype": "<datatype>", "format": "<format or rule>",
    "description": "<description>", "dummy_value": "<synthetic valid value>"}
3. Sort items by position, ascending.
4. Derive dummy_value from datatype, format, rules and examples. Use "" when unsure.
5. Include Clinical Staff fields, Section 1 and Section 2 fields, Section 3 fields for this RDG only, and Section 4 fields.
6. Keep ORS start and end placeholders exactly as supplied.
7. No markdown and no commentary.

Form blocks:
Each Section 3 assessment block is bounded by a start and an end marker and holds a fixed,
ordered list of fields. Never skip, reorder, insert or merge fields inside a block.
- EQ5D-5L admission and discharge: DateAssessed, Type, Assessedby, Mobility, SelfCare,
  UsualActivities, Pain/Discomfort, AnxietyDepression, RateHealth, Please Specify.
- FIM admission and discharge: DateAssessed, Type, Assessedby, Eating, Grooming, Bathing,
  DressingUpper, DressingLower, Toileting, Bladder, Bowel, Transfer, TransferToilet,
  TransferBath, LocomotionType, LocomotionWalk, LocomotionWheelchair, LocomotionBoth, Stairs,
  Comprehension, ComprehensionCategory, Expression, ExpressionCategory, SocialInteraction,
  ProblemSolving, Memory, Please Specify.
- MBI admission and discharge: DateAssessed, Type, Assessedby, ChairBedTransfers, Ambulation,
  Wheelchair, StairClimbing, ToiletTransfers, BowelControl, BladderControl, Bathing, Dressing,
  PersonalHygieneGrooming, Feeding, Please Specify.
"#;

pub fn system_prompt() -> &'static str {
    SYSTEM_PROMPT
}

pub fn user_prompt(category: &str, records: &[FieldRecord]) -> Result<String> {
    let spec = to_spec_json(records)?;
    Ok(format!(
        "Generate the sheet specification for RDG = \"{category}\".\n\n\
         Field records (JSON):\n\n{spec}\n\n\
         Return only the JSON array sorted by position."
    ))
}

/// Ask the generator for a spec and parse its reply.
pub fn request_spec(
    generator: &dyn TextGenerator,
    category: &str,
    records: &[FieldRecord],
) -> Result<Vec<FieldRecord>> {
    let user = user_prompt(category, records)?;
    let reply = generator
        .generate(system_prompt(), &user)
        .map_err(|error| CatalogError::Generator {
            message: format!("{error:#}"),
        })?;
    let parsed = parse_generated_spec(&reply)?;
    info!(
        category,
        requested = records.len(),
        returned = parsed.len(),
        "text generator returned spec"
    );
    Ok(parsed)
}
