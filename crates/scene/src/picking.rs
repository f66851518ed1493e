use foundation::math::Vec3;
use foundation::{Aabb3, Viewport};

use crate::projection::{FAR, WORLD_UP};
use crate::view::ViewState;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit direction.
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self { origin, dir }
    }

    pub fn at(&self, t: f64) -> Vec3 {
        self.origin + self.dir * t
    }
}

/// Anything the interaction surface can hit-test.
pub trait HitRegion {
    fn bounds(&self) -> Aabb3;
}

impl HitRegion for Aabb3 {
    fn bounds(&self) -> Aabb3 {
        *self
    }
}

/// World-space ray from the eye through pixel `(x_px, y_px)`.
///
/// Pixel coordinates have their origin at the top-left corner of the
/// viewport. Uses the same camera basis as the view matrix, so the center
/// pixel maps onto the view direction.
pub fn screen_ray(view: &ViewState, viewport: Viewport, x_px: f64, y_px: f64) -> Option<Ray> {
    let aspect = viewport.aspect()?;
    let forward = view.forward()?;
    let side = forward
        .cross(WORLD_UP)
        .normalize()
        .or_else(|| forward.cross(Vec3::Y).normalize())?;
    let up = side.cross(forward);

    let ndc_x = 2.0 * x_px / viewport.width - 1.0;
    let ndc_y = 1.0 - 2.0 * y_px / viewport.height;
    let tan_half = (0.5 * view.vertical_fov).tan();

    let dir = forward + side * (ndc_x * tan_half * aspect) + up * (ndc_y * tan_half);
    Some(Ray::new(view.eye, dir.normalize()?))
}

#[derive(Debug)]
pub struct PickHit<'a, T> {
    /// Position of the hit region in the surface's list.
    pub index: usize,
    pub region: &'a T,
    pub distance: f64,
    pub point: Vec3,
}

/// First region in list order that `ray` intersects within `max_distance`.
///
/// Ordering contract: overlapping regions resolve by list position, not by
/// depth. The list order is the compositor's domain precedence.
pub fn pick_first<'a, T: HitRegion>(
    regions: &'a [T],
    ray: Ray,
    max_distance: f64,
) -> Option<PickHit<'a, T>> {
    regions.iter().enumerate().find_map(|(index, region)| {
        let t = region.bounds().ray_hit_t(ray.origin, ray.dir, 0.0, max_distance)?;
        Some(PickHit {
            index,
            region,
            distance: t,
            point: ray.at(t),
        })
    })
}

/// Hit-testing surface laid over the rendered frame.
///
/// Receives the composed interactables together with the camera and
/// viewport they were rendered with, and resolves pointer positions to the
/// first matching region.
#[derive(Debug)]
pub struct InteractionSurface<T> {
    regions: Vec<T>,
    viewport: Viewport,
    view: ViewState,
}

impl<T: HitRegion> InteractionSurface<T> {
    pub fn new(viewport: Viewport, view: ViewState) -> Self {
        Self {
            regions: Vec::new(),
            viewport,
            view,
        }
    }

    /// Replaces everything the surface knows about the current frame.
    pub fn refresh(&mut self, regions: Vec<T>, viewport: Viewport, view: ViewState) {
        self.regions = regions;
        self.viewport = viewport;
        self.view = view;
    }

    /// Updates the camera and viewport, keeping the current regions.
    pub fn set_camera(&mut self, viewport: Viewport, view: ViewState) {
        self.viewport = viewport;
        self.view = view;
    }

    pub fn regions(&self) -> &[T] {
        &self.regions
    }

    pub fn pick(&self, x_px: f64, y_px: f64) -> Option<PickHit<'_, T>> {
        let ray = screen_ray(&self.view, self.viewport, x_px, y_px)?;
        pick_first(&self.regions, ray, FAR)
    }
}

#[cfg(test)]
mod tests {
    use super::{InteractionSurface, Ray, pick_first, screen_ray};
    use crate::view::ViewState;
    use foundation::math::Vec3;
    use foundation::{Aabb3, Viewport};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    fn unit_box(center: Vec3) -> Aabb3 {
        Aabb3::around(center, Vec3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn center_pixel_follows_view_direction() {
        let view = ViewState::default();
        let ray = screen_ray(&view, Viewport::new(800.0, 600.0), 400.0, 300.0).expect("ray");
        let f = view.forward().expect("forward");
        assert_close(ray.dir.dot(f), 1.0, 1e-12);
        assert_eq!(ray.origin, view.eye);
    }

    #[test]
    fn top_edge_pixel_is_half_fov_above_center() {
        let view = ViewState::new(Vec3::new(-10.0, 0.0, 0.0), Vec3::ZERO, 1.0);
        let ray = screen_ray(&view, Viewport::new(100.0, 100.0), 50.0, 0.0).expect("ray");
        assert_close(ray.dir.z.atan2(ray.dir.x), 0.5, 1e-12);
    }

    #[test]
    fn empty_viewport_has_no_ray() {
        assert!(screen_ray(&ViewState::default(), Viewport::new(0.0, 0.0), 0.0, 0.0).is_none());
    }

    #[test]
    fn first_region_in_list_wins_over_nearer_one() {
        let far = unit_box(Vec3::new(10.0, 0.0, 0.0));
        let near = unit_box(Vec3::new(5.0, 0.0, 0.0));
        let regions = [far, near];
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        let hit = pick_first(&regions, ray, 100.0).expect("hit");
        assert_eq!(hit.index, 0);
        assert_eq!(hit.distance, 9.0);
        assert_eq!(hit.point, Vec3::new(9.0, 0.0, 0.0));
    }

    #[test]
    fn regions_beyond_max_distance_are_ignored() {
        let regions = [unit_box(Vec3::new(10.0, 0.0, 0.0))];
        assert!(pick_first(&regions, Ray::new(Vec3::ZERO, Vec3::X), 5.0).is_none());
    }

    #[test]
    fn surface_picks_region_under_center_pixel() {
        let view = ViewState::default();
        let viewport = Viewport::new(800.0, 600.0);
        let mut surface = InteractionSurface::new(viewport, view);
        surface.refresh(
            vec![unit_box(Vec3::new(500.0, 0.0, 0.0)), unit_box(Vec3::ZERO)],
            viewport,
            view,
        );

        let hit = surface.pick(400.0, 300.0).expect("hit");
        assert_eq!(hit.index, 1);
        assert!(surface.pick(0.0, 0.0).is_none());
    }

    #[test]
    fn camera_change_keeps_regions() {
        let viewport = Viewport::new(800.0, 600.0);
        let mut surface = InteractionSurface::new(viewport, ViewState::default());
        surface.refresh(vec![unit_box(Vec3::ZERO)], viewport, ViewState::default());

        surface.set_camera(Viewport::new(400.0, 300.0), ViewState::default());
        assert_eq!(surface.regions().len(), 1);
        assert_eq!(surface.pick(200.0, 150.0).expect("hit").index, 0);
    }
}
