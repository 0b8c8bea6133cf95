use std::borrow::Borrow;

use nalgebra::{
    Isometry3, Matrix4, Point3, Quaternion, RealField, SymmetricEigen, Translation3,
    UnitQuaternion, Vector3, Vector4,
};

use crate::{
    rotation::{canonical_sign, Orientation},
    tf_error::TfError,
};

/// Anything that describes a position in 3D space.
pub trait Position<T: RealField + Copy> {
    fn to_position(&self) -> Vector3<T>;
}

impl<T: RealField + Copy> Position<T> for Vector3<T> {
    fn to_position(&self) -> Vector3<T> {
        *self
    }
}

impl<T: RealField + Copy> Position<T> for Point3<T> {
    fn to_position(&self) -> Vector3<T> {
        self.coords
    }
}

impl<T: RealField + Copy> Position<T> for Translation3<T> {
    fn to_position(&self) -> Vector3<T> {
        self.vector
    }
}

impl<T: RealField + Copy, P: Position<T> + ?Sized> Position<T> for &P {
    fn to_position(&self) -> Vector3<T> {
        (**self).to_position()
    }
}

fn count_as_scalar<T: RealField + Copy>(count: usize) -> T {
    nalgebra::convert(count as f64)
}

/// Calculate the componentwise mean of a set of positions.
pub fn average_positions<T, I>(samples: I) -> Result<Vector3<T>, TfError>
where
    T: RealField + Copy,
    I: IntoIterator,
    I::Item: Position<T>,
{
    let mut sum = Vector3::zeros();
    let mut count = 0usize;
    for sample in samples {
        sum += sample.to_position();
        count += 1;
    }

    if count == 0 {
        return Err(TfError::EmptyInput("positions"));
    }
    log::trace!("averaged {} positions", count);

    Ok(sum / count_as_scalar::<T>(count))
}

/// Index of the largest eigenvalue. Equal values resolve to the lowest index.
fn largest_eigenvalue_index<T: RealField + Copy>(eigenvalues: &Vector4<T>) -> usize {
    let mut largest = 0;
    for (index, value) in eigenvalues.iter().enumerate().skip(1) {
        if *value > eigenvalues[largest] {
            largest = index;
        }
    }

    let ties = eigenvalues
        .iter()
        .filter(|value| {
            (**value - eigenvalues[largest]).abs() <= T::default_epsilon() * (T::one() + T::one())
        })
        .count();
    if ties > 1 {
        log::debug!(
            "orientation average is ambiguous: {} eigenvalues tie at {:?}",
            ties,
            eigenvalues[largest]
        );
    }

    largest
}

/// Calculate the average orientation of a set of rotations.
///
/// This computes the quaternion minimizing the summed squared chordal distance to all samples,
/// which is the eigenvector of the largest eigenvalue of `sum(q * q^T) / n`. Unlike averaging the
/// quaternion components directly, this is insensitive to the sign of the samples.
///
/// Samples may be given as any [`Orientation`] (quaternions, rotation matrices, angle-axis).
/// The result has a non-negative `w` component.
pub fn average_rotations<T, I>(samples: I) -> Result<UnitQuaternion<T>, TfError>
where
    T: RealField + Copy,
    I: IntoIterator,
    I::Item: Orientation<T>,
{
    let mut accumulator = Matrix4::<T>::zeros();
    let mut count = 0usize;
    for sample in samples {
        let q = sample.to_unit_quaternion();
        let row = Vector4::new(q.w, q.i, q.j, q.k);
        accumulator += row * row.transpose();
        count += 1;
    }

    if count == 0 {
        return Err(TfError::EmptyInput("orientations"));
    }
    log::trace!("averaged {} orientations", count);

    accumulator /= count_as_scalar::<T>(count);

    let eigen = SymmetricEigen::new(accumulator);
    let largest = eigen
        .eigenvectors
        .column(largest_eigenvalue_index(&eigen.eigenvalues))
        .into_owned();

    let q = canonical_sign(Quaternion::new(largest[0], largest[1], largest[2], largest[3]));
    Ok(UnitQuaternion::new_normalize(q))
}

/// Calculate the average of a set of isometries.
///
/// The translations and rotations are averaged independently and recomposed as
/// `translation * rotation`.
pub fn average_isometries<T, I>(samples: I) -> Result<Isometry3<T>, TfError>
where
    T: RealField + Copy,
    I: IntoIterator,
    I::Item: Borrow<Isometry3<T>>,
{
    let (positions, rotations): (Vec<Vector3<T>>, Vec<UnitQuaternion<T>>) = samples
        .into_iter()
        .map(|sample| {
            let sample = sample.borrow();
            (sample.translation.vector, sample.rotation)
        })
        .unzip();

    if positions.is_empty() {
        return Err(TfError::EmptyInput("isometries"));
    }

    let translation = Translation3::from(average_positions(&positions)?);
    let rotation = average_rotations(&rotations)?;
    Ok(Isometry3::from_parts(translation, rotation))
}
