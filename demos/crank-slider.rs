use kinemono::{
    AngularAcceleration, AngularVelocity, FrameRegistry, Monogram, PositionVector,
    RotationMatrix, SpatialVelocity, TranslationalAcceleration, TranslationalVelocity,
};
use uom::si::f64::{
    Angle, AngularAcceleration as AngularRate2, AngularVelocity as AngularRate, Length,
};
use uom::si::{
    angle::radian, angular_acceleration::radian_per_second_squared,
    angular_velocity::radian_per_second, length::meter,
};

fn main() -> kinemono::Result<()> {
    // a crank C turns about the z axis of the world frame W, with its pivot Co at Wo. a
    // connecting rod L runs from its end Lp, pinned to the crank at Cp, to a slider at Lb, which
    // is constrained to the x axis of W.
    let mut frames = FrameRegistry::new();
    let (w, c, l) = (frames.frame("W"), frames.frame("C"), frames.frame("L"));
    let (wo, co) = (frames.origin(w)?, frames.origin(c)?);
    let cp = frames.point(c, "p")?;
    let (lp, lb) = (frames.point(l, "p")?, frames.point(l, "b")?);

    // crank radius and rod length
    let (crank, rod) = (0.05, 0.2);
    // crank angle and its first two derivatives (eg, from an encoder)
    let (theta, theta_dot, theta_ddot) = (30f64.to_radians(), 10., 2.);

    // rod angle from the slider constraint `crank * sin(theta) + rod * sin(phi) = 0`, and its
    // derivatives from differentiating that constraint
    let phi = (-crank * theta.sin() / rod).asin();
    let phi_dot = -crank * theta.cos() * theta_dot / (rod * phi.cos());
    let phi_ddot = (crank * theta.sin() * theta_dot.powi(2) - crank * theta.cos() * theta_ddot
        + rod * phi.sin() * phi_dot.powi(2))
        / (rod * phi.cos());

    let [crank_yaw, rod_yaw, zero] = [theta, phi, 0.].map(Angle::new::<radian>);
    let r_wc = RotationMatrix::from_tait_bryan_angles(w, c, crank_yaw, zero, zero)
        .expect("finite crank angle");
    let r_wl = RotationMatrix::from_tait_bryan_angles(w, l, rod_yaw, zero, zero)
        .expect("finite rod angle");

    // the crank pin, worked out in crank coordinates and then re-expressed in the world
    let w_wc = AngularVelocity::in_measured_frame(
        w,
        c,
        [0., 0., theta_dot].map(AngularRate::new::<radian_per_second>),
    );
    let alpha_wc = AngularAcceleration::in_measured_frame(
        w,
        c,
        [0., 0., theta_ddot].map(AngularRate2::new::<radian_per_second_squared>),
    );
    let p_cocp = PositionVector::build(co, cp, c, [crank, 0., 0.].map(Length::new::<meter>))
        .reexpress(&r_wc)?;
    let v_wcp = TranslationalVelocity::zero(w, wo, co, w).shift(&w_wc, &p_cocp)?;
    let a_wcp = TranslationalAcceleration::zero(w, wo, co, w).shift(&alpha_wc, &w_wc, &p_cocp)?;
    println!("{}", v_wcp.labelled(&frames)?);
    println!("{}", a_wcp.labelled(&frames)?);

    // the rod's end is where the crank pin is, so it moves the same way. the slider moves with
    // the rod from there.
    let v_wlp = TranslationalVelocity::build(w, wo, lp, w, v_wcp.to_cartesian());
    let a_wlp = TranslationalAcceleration::build(w, wo, lp, w, a_wcp.to_cartesian());
    let w_wl = AngularVelocity::in_measured_frame(
        w,
        l,
        [0., 0., phi_dot].map(AngularRate::new::<radian_per_second>),
    );
    let alpha_wl = AngularAcceleration::in_measured_frame(
        w,
        l,
        [0., 0., phi_ddot].map(AngularRate2::new::<radian_per_second_squared>),
    );
    let p_lplb = PositionVector::build(lp, lb, l, [rod, 0., 0.].map(Length::new::<meter>))
        .reexpress(&r_wl)?;
    let v_wlb = v_wlp.shift(&w_wl, &p_lplb)?;
    let a_wlb = a_wlp.shift(&alpha_wl, &w_wl, &p_lplb)?;
    println!("{}", v_wlb.labelled(&frames)?);
    println!("{}", a_wlb.labelled(&frames)?);

    // which had better stay on the x axis
    assert!(v_wlb.to_si().y.abs() < 1e-12);
    assert!(a_wlb.to_si().y.abs() < 1e-12);

    // the rod as a whole, and as seen from the crank
    let v_wl = SpatialVelocity::new(w_wl, v_wlp)?;
    let v_wc = SpatialVelocity::new(w_wc, TranslationalVelocity::zero(w, wo, co, w))?;
    println!("{}", v_wl.labelled(&frames)?);
    println!("{}", v_wl.relative(&v_wc)?.labelled(&frames)?);

    Ok(())
}
