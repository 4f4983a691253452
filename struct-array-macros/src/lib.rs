use proc_macro::TokenStream;
use syn::{parse_macro_input, ItemStruct};

mod expand;

/// Turns an empty struct declaration into a fixed-capacity container with
/// `size` inline slots of its element type.
///
/// ```rust,ignore
/// use struct_array::{struct_array, StructArray};
///
/// /// Red, green and blue channels.
/// #[struct_array(3)]
/// pub struct Rgb<C>;
///
/// let mut rgb = Rgb::<u8>::default();
/// rgb[0] = 255;
/// assert_eq!(rgb.get(3), None);
/// ```
///
/// The struct must not declare fields and may have at most one plain type
/// parameter, used as the element type (`T` if omitted), whose name must
/// differ from the struct's. Visibility and outer attributes are kept.
/// `#[derive(..)]` written after `#[struct_array]` is merged into the
/// generated derive list; the derives listed below are already provided and
/// dropped. A derive written before it runs on the empty declaration and
/// conflicts with the expansion.
///
/// # Size
///
/// `size` must be an integer literal in `0..=255`. `0` disables generation
/// and leaves the declaration untouched. Anything else, a non-literal or a
/// wrong number of arguments is a compile error.
///
/// # Generated items
///
/// * fields `_value0` .. `_value{size - 1}`,
/// * `LENGTH`, `from_fn`, `get`, `get_mut`, `set`, `into_vec` and `to_vec`,
/// * `Index<usize>` and `IndexMut<usize>`, which panic outside `0..LENGTH`,
/// * `Debug` plus the derives `Clone, Copy, Default, PartialEq, Eq, Hash`,
/// * an implementation of [`StructArray`].
///
/// [`StructArray`]: ../struct_array/trait.StructArray.html
#[proc_macro_attribute]
pub fn struct_array(args: TokenStream, item: TokenStream) -> TokenStream {
    let item = parse_macro_input!(item as ItemStruct);
    match expand::inline(args.into(), item) {
        Ok(expanded) => expanded.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

/// Declares standalone containers by name, grouped into modules by namespace.
///
/// Each entry is a `("Name", "namespace", size)` tuple:
///
/// ```rust,ignore
/// struct_array::struct_arrays! {
///     ("Vec3Storage", "Geometry", 3),
///     ("Pair", "geometry", 2),
///     ("Scratch", "", 16),
///     ("Disabled", "geometry", 0),
/// }
///
/// let v = geometry::Vec3Storage::from_fn(|i| i as f32);
/// ```
///
/// Namespaces may be dotted (`Geometry.Shapes`) or written as a Rust path;
/// every segment becomes a snake_case `pub mod`. An empty namespace declares
/// the type where the macro is invoked. Entries with size `0` are skipped,
/// and declaring the same `namespace::Name` twice is an error.
#[proc_macro]
pub fn struct_arrays(input: TokenStream) -> TokenStream {
    match expand::named(input.into()) {
        Ok(expanded) => expanded.into(),
        Err(e) => e.to_compile_error().into(),
    }
}
