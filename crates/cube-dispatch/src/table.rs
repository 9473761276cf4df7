//! Fixed mapping from the six canonical faces to actions

use cube_core::{Error, Orientation, OrientationSymbol, RecognizedOrientations, Result};
use serde::Serialize;

use crate::action::TimeTrackingAction;

const fn slot(orientation: Orientation) -> usize {
    match orientation {
        Orientation::PositiveX => 0,
        Orientation::NegativeX => 1,
        Orientation::PositiveY => 2,
        Orientation::NegativeY => 3,
        Orientation::PositiveZ => 4,
        Orientation::NegativeZ => 5,
    }
}

/// Read-only table with exactly one action per canonical face
#[derive(Clone, Debug, PartialEq)]
pub struct OrientationTable<A> {
    actions: [A; 6],
}

impl<A> OrientationTable<A> {
    /// Build from `(face, action)` pairs; every face must appear exactly once
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Orientation, A)>,
    {
        let mut slots: [Option<A>; 6] = Default::default();
        for (orientation, action) in pairs {
            let entry = &mut slots[slot(orientation)];
            if entry.is_some() {
                return Err(Error::InvalidTable(format!("{orientation} listed twice")));
            }
            *entry = Some(action);
        }
        let missing: Vec<String> = Orientation::ALL
            .iter()
            .filter(|o| slots[slot(**o)].is_none())
            .map(|o| o.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(Error::InvalidTable(format!(
                "no action for {}",
                missing.join(", ")
            )));
        }
        let actions: Vec<A> = slots.into_iter().flatten().collect();
        let actions: [A; 6] = actions
            .try_into()
            .map_err(|_| Error::InvalidTable("expected six actions".to_string()))?;
        Ok(Self { actions })
    }

    /// Build by computing the action for each face
    pub fn from_fn(mut f: impl FnMut(Orientation) -> A) -> Self {
        Self {
            actions: Orientation::ALL.map(&mut f),
        }
    }

    pub fn resolve(&self, orientation: Orientation) -> &A {
        &self.actions[slot(orientation)]
    }

    /// Look up a raw symbol; undefined or non-canonical symbols have no action
    pub fn lookup(&self, symbol: &OrientationSymbol) -> Option<&A> {
        symbol.orientation().map(|o| self.resolve(o))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Orientation, &A)> + '_ {
        Orientation::ALL.into_iter().map(move |o| (o, self.resolve(o)))
    }

    pub fn map<B>(&self, mut f: impl FnMut(Orientation, &A) -> B) -> OrientationTable<B> {
        OrientationTable::from_fn(|o| f(o, self.resolve(o)))
    }
}

impl<A> RecognizedOrientations for OrientationTable<A> {
    /// The table is total over the canonical faces
    fn recognizes(&self, _orientation: Orientation) -> bool {
        true
    }
}

impl<A: Serialize> Serialize for OrientationTable<A> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(6))?;
        for (orientation, action) in self.iter() {
            map.serialize_entry(&orientation, action)?;
        }
        map.end()
    }
}

impl OrientationTable<TimeTrackingAction> {
    /// The time-tracking cube: face up on +z stops the running entry, the
    /// other five faces start one project each, in the order +x, +y, -x, -y, -z.
    pub fn time_tracking(project_ids: [u64; 5]) -> Self {
        let [px, py, nx, ny, nz] = project_ids;
        Self::from_fn(|orientation| match orientation {
            Orientation::PositiveZ => TimeTrackingAction::StopCurrent,
            Orientation::PositiveX => TimeTrackingAction::Start { project_id: px },
            Orientation::PositiveY => TimeTrackingAction::Start { project_id: py },
            Orientation::NegativeX => TimeTrackingAction::Start { project_id: nx },
            Orientation::NegativeY => TimeTrackingAction::Start { project_id: ny },
            Orientation::NegativeZ => TimeTrackingAction::Start { project_id: nz },
        })
    }
}
