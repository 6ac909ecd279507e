use crate::kinematics::Region;

/// Returns the global equation number of a component at a point
///
/// The numbering is point-major with the component varying fastest.
#[inline]
pub fn eq_number(point_id: usize, ndim: usize, component: usize) -> usize {
    point_id * ndim + component
}

/// Returns the total number of equations of a vector field on a region
#[inline]
pub fn n_equation(region: &Region) -> usize {
    region.npoint * region.ndim
}

/// Computes the local-to-global map of a cell
///
/// The local numbering follows the same convention: node-major with the
/// component varying fastest, i.e., local index `a·ndim + i`.
pub fn local_to_global(region: &Region, c: usize) -> Vec<usize> {
    let ndim = region.ndim;
    let mut l2g = Vec::with_capacity(region.nnode * ndim);
    for point_id in region.points(c) {
        for i in 0..ndim {
            l2g.push(eq_number(*point_id, ndim, i));
        }
    }
    l2g
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
