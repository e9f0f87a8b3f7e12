use super::types::Registration;

/// Case-insensitive substring match over name, bib number, NIK and category.
/// An empty term matches every record.
pub fn matches(registration: &Registration, term: &str) -> bool {
    let term = term.to_lowercase();
    [
        registration.name.as_str(),
        registration.bib_number.as_str(),
        registration.nik.as_str(),
        registration.category.as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&term))
}

/// Records matching `term`, in their stored order
pub fn filter<'a>(registrations: &'a [Registration], term: &str) -> Vec<&'a Registration> {
    registrations
        .iter()
        .filter(|registration| matches(registration, term))
        .collect()
}
