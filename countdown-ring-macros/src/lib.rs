use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{parse_macro_input, Data, DeriveInput, Fields};

/// Derive a reactive store with one signal per field.
///
/// For a struct `State` this generates `StateSignals`, holding a public
/// `Signal<T>` for every named field of `State`, plus:
///
/// - `StateSignals::new(initial: State)` - one signal per field
/// - `get()` - tracked snapshot, re-runs the calling effect on change
/// - `get_untracked()` - snapshot without dependency tracking
/// - `set(value: State)` - writes every field inside a single batch
///
/// The annotated struct must be `Clone` and every field type must be
/// `Clone + PartialEq + Send + Sync + 'static`.
///
/// # Example
/// ```ignore
/// #[derive(Clone, PartialEq, SignalFields)]
/// struct Progress {
///     degrees: f32,
///     label: String,
/// }
///
/// let progress = ProgressSignals::new(Progress { degrees: 0.0, label: "Ready".into() });
/// progress.label.set("3".into());
/// ```
#[proc_macro_derive(SignalFields)]
pub fn derive_signal_fields(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let struct_name = &input.ident;
    let vis = &input.vis;
    let signals_name = format_ident!("{}Signals", struct_name);

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return syn::Error::new_spanned(
                    struct_name,
                    "SignalFields can only be derived for structs with named fields",
                )
                .to_compile_error()
                .into();
            }
        },
        _ => {
            return syn::Error::new_spanned(struct_name, "SignalFields can only be derived for structs")
                .to_compile_error()
                .into();
        }
    };

    let names: Vec<_> = fields.iter().filter_map(|f| f.ident.clone()).collect();
    let types: Vec<_> = fields.iter().map(|f| f.ty.clone()).collect();

    let field_defs = names.iter().zip(types.iter()).map(|(name, ty)| {
        quote! {
            pub #name: ::countdown_ring::reactive::Signal<#ty>
        }
    });

    let field_inits = names.iter().map(|name| {
        quote! {
            #name: ::countdown_ring::reactive::create_signal(initial.#name)
        }
    });

    let field_gets = names.iter().map(|name| {
        quote! {
            #name: self.#name.get()
        }
    });

    let field_gets_untracked = names.iter().map(|name| {
        quote! {
            #name: self.#name.get_untracked()
        }
    });

    let field_sets = names.iter().map(|name| {
        quote! {
            self.#name.set(value.#name);
        }
    });

    let doc = format!("Reactive store for [`{}`], one signal per field.", struct_name);

    let expanded = quote! {
        #[doc = #doc]
        #[derive(Clone)]
        #vis struct #signals_name {
            #(#field_defs,)*
        }

        impl #signals_name {
            #vis fn new(initial: #struct_name) -> Self {
                Self {
                    #(#field_inits,)*
                }
            }

            /// Snapshot of every field, tracked by the running effect.
            #vis fn get(&self) -> #struct_name {
                #struct_name {
                    #(#field_gets,)*
                }
            }

            /// Snapshot of every field without dependency tracking.
            #vis fn get_untracked(&self) -> #struct_name {
                #struct_name {
                    #(#field_gets_untracked,)*
                }
            }

            /// Write every field; observers run once after all writes.
            #vis fn set(&self, value: #struct_name) {
                ::countdown_ring::reactive::batch(|| {
                    #(#field_sets)*
                });
            }
        }
    };

    TokenStream::from(expanded)
}
