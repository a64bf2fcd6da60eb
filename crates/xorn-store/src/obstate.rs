use std::sync::Arc;

use xorn_types::{normalize, validate, ObjectData, ObjectType, Payload};

use crate::error::StoreResult;

/// The immutable payload of one object at one point in time.
///
/// Obstates are shared through `Arc`: every revision in which an object is
/// unchanged points at the same instance. Embedded resources (symbols,
/// pixmaps) are held for as long as the obstate lives and released when the
/// last revision referencing it is dropped.
#[derive(Debug, PartialEq)]
pub struct ObState {
    data: ObjectData,
}

impl ObState {
    /// Validate and normalize `data` and wrap it in a new shared obstate.
    ///
    /// On failure nothing is allocated and `data` is dropped.
    pub fn create(data: impl Into<ObjectData>) -> StoreResult<Arc<Self>> {
        let mut data = data.into();
        validate(&data)?;
        normalize(&mut data);
        Ok(Arc::new(Self { data }))
    }

    pub fn object_type(&self) -> ObjectType {
        self.data.object_type()
    }

    pub fn data(&self) -> &ObjectData {
        &self.data
    }

    /// Borrow the payload as `T` if the type matches.
    pub fn get<T: Payload>(&self) -> Option<&T> {
        T::from_data(&self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use xorn_types::{LineAttr, Resource, SchComponent, SchLine, SchNet, SchText};

    #[test]
    fn create_normalizes() {
        let line = LineAttr {
            width: 1.0,
            dash_style: 0,
            dash_length: 10.0,
            dash_space: 10.0,
            ..Default::default()
        };
        let state = ObState::create(SchLine { line, ..Default::default() }).unwrap();
        let stored = state.get::<SchLine>().unwrap();
        assert_eq!(stored.line.dash_length, 0.0);
        assert_eq!(stored.line.dash_space, 0.0);
        assert_eq!(stored.line.width, 1.0);
    }

    #[test]
    fn create_rejects_invalid() {
        let err = ObState::create(SchNet {
            is_inverted: true,
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, StoreError::InvalidObjectData(_)));
    }

    #[test]
    fn resource_held_while_state_lives() {
        let symbol = Resource::new("7400");
        let state = ObState::create(SchComponent {
            symbol: symbol.clone(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(symbol.ref_count(), 2);

        let shared = Arc::clone(&state);
        assert_eq!(symbol.ref_count(), 2);
        drop(state);
        assert_eq!(symbol.ref_count(), 2);
        drop(shared);
        assert_eq!(symbol.ref_count(), 1);
    }

    #[test]
    fn rejected_state_releases_resource() {
        let symbol = Resource::new("7400");
        let result = ObState::create(SchComponent {
            angle: 45,
            symbol: symbol.clone(),
            ..Default::default()
        });
        assert!(result.is_err());
        assert_eq!(symbol.ref_count(), 1);
    }

    #[test]
    fn typed_access() {
        let state = ObState::create(SchText {
            text: "hello".into(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(state.object_type(), ObjectType::Text);
        assert_eq!(state.get::<SchText>().unwrap().text, "hello");
        assert!(state.get::<SchLine>().is_none());
    }
}
