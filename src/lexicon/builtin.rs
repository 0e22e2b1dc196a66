//! Built-in neuro-imaging vocabulary.
//!
//! Declaration order matters: matchers report hits in this order.

/// `(term, definition, medication)` — terms are lowercase.
pub(super) const GLOSSARY: &[(&str, &str, Option<&str>)] = &[
    (
        "cerebral atrophy",
        "Shrinkage or loss of brain cells, often related to aging or diseases like Alzheimer’s.",
        Some("Donepezil, Memantine (for Alzheimer's related cases)"),
    ),
    (
        "lesion",
        "An area of abnormal tissue, which could be caused by disease or injury.",
        Some("Corticosteroids (for inflammation), Surgery (if malignant)"),
    ),
    (
        "infarct",
        "Tissue death due to lack of blood supply, often seen in strokes.",
        Some("Aspirin, Clopidogrel, or Anticoagulants (for ischemic strokes)"),
    ),
    (
        "edema",
        "Swelling caused by excess fluid trapped in tissues.",
        Some("Diuretics (e.g., Furosemide), corticosteroids"),
    ),
    (
        "hemorrhage",
        "Excessive bleeding, either inside or outside the body.",
        Some("Blood pressure medication, Surgery, Coagulation therapy"),
    ),
    (
        "calcification",
        "Build-up of calcium in body tissues, often hardening them.",
        Some("Calcium channel blockers, Surgery (in some cases)"),
    ),
    (
        "contrast enhancement",
        "Technique using contrast agents in imaging to highlight areas, often related to inflammation or tumors.",
        Some("Consult with oncologist or neurologist, depending on the findings"),
    ),
    (
        "ventricular dilation",
        "Enlargement of the brain's ventricles, may suggest hydrocephalus or brain atrophy.",
        Some("Diuretics, Surgery (for hydrocephalus)"),
    ),
    (
        "mass effect",
        "Pressure from a mass (like a tumor) displacing surrounding brain structures.",
        Some("Surgery, Chemotherapy, Radiation (depending on tumor type)"),
    ),
    (
        "midline shift",
        "A shift of brain structures from their normal position, usually due to swelling or mass.",
        Some("Surgical intervention, Decompression procedures"),
    ),
];

pub(super) const EMERGENCY_TERMS: &[&str] = &[
    "hemorrhage",
    "infarct",
    "mass effect",
    "midline shift",
    "severe edema",
];
