//! Canned bot copy: topic advisories, capture-flow prompts and
//! submission notices.

use crate::intent::PestKind;

pub const WELCOME: &str = "Hello! I'm your professional pest control consultant at Jelco Pest Solutions LLC.\nHow may I assist you today? (ants, termites, quote, schedule, contact us, etc.)";

const FALLBACK: &str = "As a professional pest control consultant at Jelco Pest Solutions LLC, I'm here to help!\nCould you tell me more about the issue? (type of pest, location, etc.)";

const ANT: &str = "Ant infestations are common in the Joplin area, especially carpenter or pavement ants.\n• Describe the ants: size, color, location?\n• Indoors/outdoors? Trails visible?\nWe recommend a free inspection to identify and treat effectively.";

const TERMITE: &str = "Termites can cause serious structural damage—don't delay!\nSigns: mud tubes, discarded wings, hollow wood.\n• How long have you noticed this?\n• Any visible damage?\nOur experts can provide a thorough inspection and treatment plan.";

const BED_BUG: &str = "Bed bugs are tricky and spread quickly via travel or used furniture.\nSigns: itchy bites, blood spots on sheets, tiny dark spots.\n• Where are they appearing?\nWe use heat treatments and insecticides for complete elimination.";

const ROACH: &str = "Cockroaches pose health risks by spreading bacteria.\nCommon types: German or American.\n• Sightings at night? Droppings or egg cases?\nOur integrated pest management includes baiting and sealing entry points.";

const RODENT: &str = "Rodents like mice can damage wiring and contaminate food.\nSigns: droppings, gnaw marks, scratching sounds.\n• Entry points visible?\nWe specialize in exclusion techniques and safe trapping.";

const SPIDER: &str = "Most spiders are harmless, but some like brown recluses in Missouri can be dangerous.\nSigns: webs, egg sacs.\n• Bite symptoms? Species identification?\nRegular treatments reduce populations effectively.";

const GREETING: &str =
    "Hello! As your Jelco Pest Solutions consultant, how can I help with pest control today?";

pub const ASK_NAME: &str =
    "Great! I'd be happy to connect you with our team.\n\nMay I have your **full name** please?";

pub const ASK_ISSUE: &str = "Perfect.\n\nLastly, could you briefly describe the **pest issue** you're dealing with? (type of pest, location in home, how long, etc.)";

pub const SUBMITTING: &str =
    "Thank you! Submitting your information now... Our team will reach out soon.";

pub const SUBMISSION_SENT: &str =
    "✓ Your details have been sent successfully! We'll contact you soon.";

pub const SUBMISSION_FAILED: &str =
    "There was a small issue sending your info. Please call us directly.";

/// Advisory text for a topic. `PestKind::None` gets the generic follow-up.
pub fn generate(kind: PestKind) -> &'static str {
    match kind {
        PestKind::Ant => ANT,
        PestKind::Termite => TERMITE,
        PestKind::BedBug => BED_BUG,
        PestKind::Roach => ROACH,
        PestKind::Rodent => RODENT,
        PestKind::Spider => SPIDER,
        PestKind::Greeting => GREETING,
        PestKind::None => FALLBACK,
    }
}

/// Phone prompt, addressed by the first word of the captured name
pub fn ask_phone(name: &str) -> String {
    let first = name.split_whitespace().next().unwrap_or(name);
    format!(
        "Thank you, {first}!\n\nWhat's the **best phone number** to reach you? (include area code)"
    )
}
