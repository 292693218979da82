/// Macro used for fuzzy equality test assertions.
#[doc(hidden)]
#[macro_export]
macro_rules! assert_fuzzy_eq {
    ($left:expr, $right:expr) => {{
        match (&$left, &$right) {
            (left_val, right_val) => {
                if !(left_val.fuzzy_eq(*right_val)) {
                    panic!(
                        r#"assertion failed: `left.fuzzy_eq(right)`
  left: `{:?}`,
 right: `{:?}`"#,
                        &*left_val, &*right_val
                    )
                }
            }
        }
    }};
    ($left:expr, $right:expr, $eps:expr) => {{
        match (&$left, &$right, &$eps) {
            (left_val, right_val, eps_val) => {
                if !(left_val.fuzzy_eq_eps(*right_val, *eps_val)) {
                    panic!(
                        r#"assertion failed: `left.fuzzy_eq_eps(right, eps)`
  left: `{:?}`,
 right: `{:?}`
 eps: `{:?}`"#,
                        &*left_val, &*right_val, &*eps_val
                    )
                }
            }
        }
    }};
}

/// Used by the contour construction macros to count repetitions for reserving
/// capacity up front.
#[doc(hidden)]
#[macro_export]
macro_rules! replace_expr {
    ($_t:tt $sub:expr) => {
        $sub
    };
}

/// Construct an open [Contour](crate::contour::Contour) from a list of
/// `(x, y, bulge)` tuples.
///
/// # Examples
///
/// ```
/// # use contour_offset::contour_open;
/// # use contour_offset::contour::*;
/// let contour = contour_open![(0.0, 1.0, 1.0), (2.0, 0.0, 0.0)];
/// assert!(!contour.is_closed());
/// assert_eq!(contour[0], Vertex::new(0.0, 1.0, 1.0));
/// assert_eq!(contour[1], Vertex::new(2.0, 0.0, 0.0));
/// ```
#[macro_export]
macro_rules! contour_open {
    ($( $x:expr ),* $(,)?) => {
        {
            let size = <[()]>::len(&[$($crate::replace_expr!(($x) ())),*]);
            let mut c = $crate::contour::Contour::with_capacity(size, false);
            $(
                c.add($x.0, $x.1, $x.2);
            )*
            c
        }
    };
}

/// Construct a closed [Contour](crate::contour::Contour) from a list of
/// `(x, y, bulge)` tuples.
///
/// # Examples
///
/// ```
/// # use contour_offset::contour_closed;
/// # use contour_offset::contour::*;
/// let contour = contour_closed![(0.0, 1.0, 1.0), (2.0, 0.0, 0.0)];
/// assert!(contour.is_closed());
/// ```
#[macro_export]
macro_rules! contour_closed {
    ($( $x:expr ),* $(,)?) => {
        {
            let size = <[()]>::len(&[$($crate::replace_expr!(($x) ())),*]);
            let mut c = $crate::contour::Contour::with_capacity(size, true);
            $(
                c.add($x.0, $x.1, $x.2);
            )*
            c
        }
    };
}
