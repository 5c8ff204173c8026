use serde::{Deserialize, Serialize};

use crate::*;

/// One box on the shelf as stored by the engine.
///
/// Callers only ever see copies or shared references, so every field is read through a getter.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    label: Contents,
    is_open: bool,
    content: Contents,
    prediction: Option<Contents>,
    took: Option<Fruit>,
}

impl Container {
    pub(crate) const fn closed(label: Contents, content: Contents) -> Self {
        Self {
            label,
            is_open: false,
            content,
            prediction: None,
            took: None,
        }
    }

    pub const fn label(&self) -> Contents {
        self.label
    }

    pub const fn is_open(&self) -> bool {
        self.is_open
    }

    /// True contents. Kept hidden from players until the box is open.
    pub const fn content(&self) -> Contents {
        self.content
    }

    /// Contents if the box is open, `None` otherwise.
    pub const fn visible_content(&self) -> Option<Contents> {
        if self.is_open {
            Some(self.content)
        } else {
            None
        }
    }

    pub const fn prediction(&self) -> Option<Contents> {
        self.prediction
    }

    pub const fn took(&self) -> Option<Fruit> {
        self.took
    }

    pub const fn is_predicted(&self) -> bool {
        self.prediction.is_some()
    }

    pub fn prediction_matches(&self) -> bool {
        self.prediction == Some(self.content)
    }

    pub(crate) fn open(&mut self) {
        self.is_open = true;
    }

    pub(crate) fn set_prediction(&mut self, prediction: Contents) {
        self.prediction = Some(prediction);
    }

    pub(crate) fn set_took(&mut self, took: Option<Fruit>) {
        self.took = took;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_stays_hidden_until_open() {
        let mut container = Container::closed(Contents::Apples, Contents::Mixed);
        assert_eq!(container.visible_content(), None);

        container.open();

        assert_eq!(container.visible_content(), Some(Contents::Mixed));
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let container = Container::closed(Contents::Oranges, Contents::Apples);

        let json = serde_json::to_value(container).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "label": "oranges",
                "isOpen": false,
                "content": "apples",
                "prediction": null,
                "took": null,
            })
        );
    }
}
