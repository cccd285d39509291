// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Batch planning over all conduits.
//!
//! Planning reads the scene only. The resulting [`BatchPlan`] is applied to
//! the host afterwards, so a failing conduit never leaves half a batch behind.
//!
//! Walls reached through a link instance cannot host an opening in the
//! searched document. Such crossings are logged and counted in
//! [`BatchStats::linked_skipped`], and planning goes on.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::conduit::{Conduit, ConduitKind, ConduitRay};
use crate::dedup::{dedupe, Crossing};
use crate::error::Result;
use crate::query::{find_within, DirectionalSearchIndex};
use crate::resolve::{resolve, PlacementInstruction, WallResolver};

/// Source of the conduits to trace.
pub trait ConduitCollector {
    fn collect_conduits(&self, kind: ConduitKind) -> Result<Vec<Conduit>>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerOptions {
    /// Trace conduits on the rayon thread pool. The plan is identical to a
    /// sequential run.
    pub parallel: bool,
}

/// Counters collected while planning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchStats {
    pub ducts: usize,
    pub pipes: usize,
    /// Surface hits reported by the search, at any distance.
    pub raw_hits: usize,
    /// Hits no further than the centerline length.
    pub within_range: usize,
    /// Distinct walls crossed, summed over conduits.
    pub crossings: usize,
    /// Crossings of linked walls, left without an opening.
    #[serde(default)]
    pub linked_skipped: usize,
}

impl BatchStats {
    fn add(&mut self, other: &ConduitPlan) {
        self.raw_hits += other.raw_hits;
        self.within_range += other.within_range;
        self.crossings += other.instructions.len();
        self.linked_skipped += other.linked_skipped;
    }
}

/// Ordered placement instructions: all ducts, then all pipes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchPlan {
    pub instructions: Vec<PlacementInstruction>,
    pub stats: BatchStats,
}

impl BatchPlan {
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

struct ConduitPlan {
    raw_hits: usize,
    within_range: usize,
    linked_skipped: usize,
    instructions: SmallVec<[PlacementInstruction; 2]>,
}

/// Runs extraction, search, deduplication and resolution for every conduit.
pub struct BatchPlanner<'a, I: ?Sized, R: ?Sized> {
    index: &'a I,
    resolver: &'a R,
    options: PlannerOptions,
}

impl<'a, I, R> BatchPlanner<'a, I, R>
where
    I: DirectionalSearchIndex + Sync + ?Sized,
    R: WallResolver + Sync + ?Sized,
{
    pub fn new(index: &'a I, resolver: &'a R) -> Self {
        Self {
            index,
            resolver,
            options: PlannerOptions::default(),
        }
    }

    pub fn with_options(mut self, options: PlannerOptions) -> Self {
        self.options = options;
        self
    }

    /// Plans openings for every duct and pipe of `collector`.
    ///
    /// The first conduit that cannot be traced or resolved aborts the plan.
    pub fn plan<C>(&self, collector: &C) -> Result<BatchPlan>
    where
        C: ConduitCollector + ?Sized,
    {
        let mut plan = BatchPlan::default();

        for kind in ConduitKind::ALL {
            let conduits = collector.collect_conduits(kind)?;
            match kind {
                ConduitKind::Duct => plan.stats.ducts = conduits.len(),
                ConduitKind::Pipe => plan.stats.pipes = conduits.len(),
            }

            let results: Vec<ConduitPlan> = if self.options.parallel {
                conduits
                    .par_iter()
                    .map(|c| self.plan_conduit(c))
                    .collect::<Result<_>>()?
            } else {
                conduits
                    .iter()
                    .map(|c| self.plan_conduit(c))
                    .collect::<Result<_>>()?
            };

            for result in results {
                plan.stats.add(&result);
                plan.instructions.extend(result.instructions);
            }
        }

        tracing::info!(
            ducts = plan.stats.ducts,
            pipes = plan.stats.pipes,
            raw_hits = plan.stats.raw_hits,
            within_range = plan.stats.within_range,
            linked_skipped = plan.stats.linked_skipped,
            openings = plan.instructions.len(),
            parallel = self.options.parallel,
            "Openings planned"
        );

        Ok(plan)
    }

    fn plan_conduit(&self, conduit: &Conduit) -> Result<ConduitPlan> {
        let ray = ConduitRay::from_conduit(conduit)?;
        let (raw_hits, within) = find_within(self.index, &ray)?;
        let within_range = within.len();

        let (linked, local): (SmallVec<[Crossing; 2]>, SmallVec<[Crossing; 2]>) =
            dedupe(within).into_iter().partition(|c| c.surface.is_linked());

        for crossing in &linked {
            tracing::warn!(
                conduit = %conduit.id,
                surface = %crossing.surface,
                proximity = crossing.proximity,
                "Crossed wall is in a linked document, no opening placed"
            );
        }

        let instructions = local
            .iter()
            .map(|crossing| resolve(&ray, crossing, self.resolver))
            .collect::<Result<SmallVec<_>>>()?;

        tracing::debug!(
            conduit = %conduit.id,
            kind = %conduit.kind,
            raw_hits,
            within_range,
            crossings = instructions.len(),
            linked_skipped = linked.len(),
            "Conduit traced"
        );

        Ok(ConduitPlan {
            raw_hits,
            within_range,
            linked_skipped: linked.len(),
            instructions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::query::{IntersectionCandidate, SurfaceRef};
    use crate::resolve::WallHost;
    use nalgebra::{Point3, Unit, Vector3};
    use sleeve_geometry::{Arc, Curve, Line};
    use sleeve_model::ElementId;

    /// Walls are planes x = const, each reported twice (two faces 0.2 apart).
    struct PlaneWalls(Vec<(i64, f64)>);

    impl DirectionalSearchIndex for PlaneWalls {
        fn find(
            &self,
            origin: &Point3<f64>,
            direction: &Unit<Vector3<f64>>,
        ) -> Result<Vec<IntersectionCandidate>> {
            let mut hits = Vec::new();
            if direction.x.abs() < 1e-12 {
                return Ok(hits);
            }
            for &(id, x) in &self.0 {
                for face in [x - 0.1, x + 0.1] {
                    let t = (face - origin.x) / direction.x;
                    if t >= 0.0 {
                        hits.push(IntersectionCandidate {
                            proximity: t,
                            surface: SurfaceRef::local(ElementId::new(id)),
                        });
                    }
                }
            }
            Ok(hits)
        }
    }

    /// Every hit of the inner index is reported again through link 900,
    /// half a metre further on.
    struct WithLinkedCopies(PlaneWalls);

    impl DirectionalSearchIndex for WithLinkedCopies {
        fn find(
            &self,
            origin: &Point3<f64>,
            direction: &Unit<Vector3<f64>>,
        ) -> Result<Vec<IntersectionCandidate>> {
            let mut hits = self.0.find(origin, direction)?;
            let linked: Vec<_> = hits
                .iter()
                .map(|h| IntersectionCandidate {
                    proximity: h.proximity + 0.5,
                    surface: SurfaceRef::new(ElementId::new(900), h.surface.element),
                })
                .collect();
            hits.extend(linked);
            Ok(hits)
        }
    }

    struct LevelOne;

    impl WallResolver for LevelOne {
        fn host_of(&self, surface: SurfaceRef) -> Result<WallHost> {
            Ok(WallHost {
                wall: surface.element,
                level: ElementId::new(1),
            })
        }
    }

    #[derive(Default)]
    struct Conduits {
        ducts: Vec<Conduit>,
        pipes: Vec<Conduit>,
    }

    impl ConduitCollector for Conduits {
        fn collect_conduits(&self, kind: ConduitKind) -> Result<Vec<Conduit>> {
            Ok(match kind {
                ConduitKind::Duct => self.ducts.clone(),
                ConduitKind::Pipe => self.pipes.clone(),
            })
        }
    }

    fn conduit(id: i64, kind: ConduitKind, y: f64, length: f64, diameter: f64) -> Conduit {
        Conduit {
            id: ElementId::new(id),
            kind,
            centerline: Curve::Line(Line::new(
                Point3::new(0.0, y, 1.0),
                Point3::new(length, y, 1.0),
            )),
            diameter,
        }
    }

    fn scene() -> PlaneWalls {
        PlaneWalls(vec![(10, 4.0), (11, 8.0)])
    }

    #[test]
    fn ducts_come_before_pipes() {
        let conduits = Conduits {
            ducts: vec![conduit(100, ConduitKind::Duct, 0.0, 5.0, 0.2)],
            pipes: vec![conduit(200, ConduitKind::Pipe, 1.0, 10.0, 0.05)],
        };
        let plan = BatchPlanner::new(&scene(), &LevelOne).plan(&conduits).unwrap();

        let order: Vec<_> = plan.instructions.iter().map(|i| (i.conduit.value(), i.host_wall.value())).collect();
        assert_eq!(order, vec![(100, 10), (200, 10), (200, 11)]);
        assert_eq!(plan.stats.ducts, 1);
        assert_eq!(plan.stats.pipes, 1);
        assert_eq!(plan.stats.raw_hits, 8);
        assert_eq!(plan.stats.within_range, 6);
        assert_eq!(plan.stats.crossings, 3);

        let first = &plan.instructions[0];
        assert!((first.location.x - 3.9).abs() < 1e-12);
        assert_eq!(first.width, 0.2);
        assert_eq!(first.height, 0.2);
    }

    #[test]
    fn conduit_without_crossings_plans_nothing() {
        let conduits = Conduits {
            ducts: vec![conduit(100, ConduitKind::Duct, 0.0, 3.0, 0.2)],
            ..Default::default()
        };
        let plan = BatchPlanner::new(&scene(), &LevelOne).plan(&conduits).unwrap();
        assert!(plan.is_empty());
        assert_eq!(plan.stats.raw_hits, 4);
        assert_eq!(plan.stats.within_range, 0);
    }

    #[test]
    fn removing_a_conduit_keeps_the_others() {
        let all = Conduits {
            ducts: vec![
                conduit(100, ConduitKind::Duct, 0.0, 5.0, 0.2),
                conduit(101, ConduitKind::Duct, 2.0, 10.0, 0.3),
            ],
            pipes: vec![conduit(200, ConduitKind::Pipe, 1.0, 10.0, 0.05)],
        };
        let without = Conduits {
            ducts: vec![all.ducts[1].clone()],
            pipes: all.pipes.clone(),
        };

        let scene = scene();
        let planner = BatchPlanner::new(&scene, &LevelOne);
        let full = planner.plan(&all).unwrap();
        let partial = planner.plan(&without).unwrap();

        let kept: Vec<_> = full
            .instructions
            .iter()
            .filter(|i| i.conduit != ElementId::new(100))
            .cloned()
            .collect();
        assert_eq!(kept, partial.instructions);
    }

    #[test]
    fn parallel_plan_matches_sequential() {
        let conduits = Conduits {
            ducts: (0..64)
                .map(|i| conduit(100 + i, ConduitKind::Duct, i as f64, 2.0 + (i % 9) as f64, 0.2))
                .collect(),
            pipes: (0..64)
                .map(|i| conduit(500 + i, ConduitKind::Pipe, i as f64, 1.0 + (i % 11) as f64, 0.05))
                .collect(),
        };

        let index = scene();
        let sequential = BatchPlanner::new(&index, &LevelOne).plan(&conduits).unwrap();
        let parallel = BatchPlanner::new(&index, &LevelOne)
            .with_options(PlannerOptions { parallel: true })
            .plan(&conduits)
            .unwrap();

        assert!(!sequential.is_empty());
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn linked_walls_are_skipped_and_counted() {
        let conduits = Conduits {
            ducts: vec![conduit(100, ConduitKind::Duct, 0.0, 5.0, 0.2)],
            ..Default::default()
        };
        let plan = BatchPlanner::new(&WithLinkedCopies(scene()), &LevelOne)
            .plan(&conduits)
            .unwrap();

        assert_eq!(plan.len(), 1);
        assert_eq!(plan.instructions[0].host_wall, ElementId::new(10));
        assert_eq!(plan.stats.raw_hits, 8);
        assert_eq!(plan.stats.within_range, 4);
        assert_eq!(plan.stats.crossings, 1);
        assert_eq!(plan.stats.linked_skipped, 1);
    }

    #[test]
    fn curved_conduit_aborts_the_plan() {
        let bend = Conduit {
            id: ElementId::new(300),
            kind: ConduitKind::Pipe,
            centerline: Curve::Arc(Arc {
                center: Point3::origin(),
                radius: 1.0,
                normal: Vector3::z_axis(),
                x_axis: Vector3::x_axis(),
                start_angle: 0.0,
                end_angle: 1.0,
            }),
            diameter: 0.05,
        };
        let conduits = Conduits {
            ducts: vec![conduit(100, ConduitKind::Duct, 0.0, 5.0, 0.2)],
            pipes: vec![bend],
        };

        let result = BatchPlanner::new(&scene(), &LevelOne).plan(&conduits);
        assert!(matches!(result, Err(Error::NonLinearCenterline(id)) if id == ElementId::new(300)));
    }
}
