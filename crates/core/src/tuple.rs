use crate::commands::value::ArgumentValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pair<U, V> {
    pub first: U,
    pub second: V,
}

impl<U, V> Pair<U, V> {
    pub fn of(first: U, second: V) -> Self {
        Self { first, second }
    }

    pub fn into_tuple(self) -> (U, V) {
        (self.first, self.second)
    }
}

impl<U, V> ArgumentValue for Pair<U, V>
where
    U: Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Triplet<U, V, Z> {
    pub first: U,
    pub second: V,
    pub third: Z,
}

impl<U, V, Z> Triplet<U, V, Z> {
    pub fn of(first: U, second: V, third: Z) -> Self {
        Self {
            first,
            second,
            third,
        }
    }

    pub fn into_tuple(self) -> (U, V, Z) {
        (self.first, self.second, self.third)
    }
}

impl<U, V, Z> ArgumentValue for Triplet<U, V, Z>
where
    U: Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
    Z: Clone + Send + Sync + 'static,
{
}
