/// A radio model as understood by chirpc's `-r` flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadioModel {
    /// Name shown to the operator.
    pub name: String,
    /// Identifier passed to chirpc.
    pub id: String,
}

impl RadioModel {
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
        }
    }

    /// File name offered when downloading from this model.
    pub fn default_image_name(&self) -> String {
        format!("{}.img", self.id)
    }
}

pub fn builtin_models() -> Vec<RadioModel> {
    vec![RadioModel::new("Baofeng UV-5R", "Baofeng_UV-5R")]
}

/// Looks a model up by chirpc id or display name, ignoring case.
pub fn find_model<'a>(models: &'a [RadioModel], key: &str) -> Option<&'a RadioModel> {
    models
        .iter()
        .find(|m| m.id.eq_ignore_ascii_case(key) || m.name.eq_ignore_ascii_case(key))
}
