/// The value of one field across a selection.
#[derive(Clone, Debug, PartialEq)]
pub enum AttrState<T> {
    /// No selected object has this field.
    NotApplicable,
    /// Every selected object that has the field agrees on its value.
    Consistent(T),
    /// Selected objects disagree.
    Inconsistent,
}

impl<T: PartialEq> AttrState<T> {
    /// Fold one more value into the state.
    pub fn merge(self, value: T) -> Self {
        match self {
            Self::NotApplicable => Self::Consistent(value),
            Self::Consistent(current) if current == value => Self::Consistent(current),
            Self::Consistent(_) | Self::Inconsistent => Self::Inconsistent,
        }
    }

    pub fn consistent(&self) -> Option<&T> {
        match self {
            Self::Consistent(value) => Some(value),
            _ => None,
        }
    }
}

impl<T: PartialEq> FromIterator<T> for AttrState<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        iter.into_iter().fold(Self::NotApplicable, Self::merge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_states() {
        assert_eq!(AttrState::<i32>::from_iter([]), AttrState::NotApplicable);
        assert_eq!(AttrState::from_iter([3, 3, 3]), AttrState::Consistent(3));
        assert_eq!(AttrState::from_iter([3, 4, 3]), AttrState::Inconsistent);
        assert_eq!(AttrState::from_iter([7]).consistent(), Some(&7));
        assert_eq!(AttrState::from_iter([1, 2]).consistent(), None);
    }
}
